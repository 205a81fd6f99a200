//! Manifest options and user strategies.
//!
//! The three user hooks are strategy traits with fixed contracts:
//!
//! - [`PathMap`]: `(public path, chunk) -> path`, applied last
//! - [`PathFilter`]: `(public path, chunk) -> bool`, applied before `map`
//! - [`ManifestSerializer`]: `(manifest) -> bytes`
//!
//! Closures with matching signatures implement them directly.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::host::Chunk;
use crate::manifest::Manifest;
use crate::{Error, Result};

/// Default manifest filename.
pub const DEFAULT_FILENAME: &str = "manifest.json";

/// Transform applied to each accepted public file path.
pub trait PathMap: Send + Sync {
    fn map(&self, path: &str, chunk: &Chunk) -> Result<String>;
}

/// Predicate deciding whether a file is listed at all.
pub trait PathFilter: Send + Sync {
    fn accept(&self, path: &str, chunk: &Chunk) -> Result<bool>;
}

/// Turns a finished manifest into the artifact bytes.
pub trait ManifestSerializer: Send + Sync {
    fn serialize(&self, manifest: &Manifest) -> Result<Vec<u8>>;
}

impl<F> PathMap for F
where
    F: Fn(&str, &Chunk) -> Result<String> + Send + Sync,
{
    fn map(&self, path: &str, chunk: &Chunk) -> Result<String> {
        self(path, chunk)
    }
}

impl<F> PathFilter for F
where
    F: Fn(&str, &Chunk) -> Result<bool> + Send + Sync,
{
    fn accept(&self, path: &str, chunk: &Chunk) -> Result<bool> {
        self(path, chunk)
    }
}

impl<F> ManifestSerializer for F
where
    F: Fn(&Manifest) -> Result<Vec<u8>> + Send + Sync,
{
    fn serialize(&self, manifest: &Manifest) -> Result<Vec<u8>> {
        self(manifest)
    }
}

/// Build a [`PathMap`] from a closure, pinning its signature.
///
/// ```rust
/// use fob_manifest::options::map_fn;
///
/// let map = map_fn(|path, _chunk| Ok(format!("{path}?v=1")));
/// ```
pub fn map_fn<F>(f: F) -> F
where
    F: Fn(&str, &Chunk) -> Result<String> + Send + Sync,
{
    f
}

/// Build a [`PathFilter`] from a closure, pinning its signature.
pub fn filter_fn<F>(f: F) -> F
where
    F: Fn(&str, &Chunk) -> Result<bool> + Send + Sync,
{
    f
}

/// Build a [`ManifestSerializer`] from a closure, pinning its signature.
pub fn serialize_fn<F>(f: F) -> F
where
    F: Fn(&Manifest) -> Result<Vec<u8>> + Send + Sync,
{
    f
}

/// Identity `map`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap;

impl PathMap for IdentityMap {
    fn map(&self, path: &str, _chunk: &Chunk) -> Result<String> {
        Ok(path.to_string())
    }
}

/// `filter` accepting every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PathFilter for AcceptAll {
    fn accept(&self, _path: &str, _chunk: &Chunk) -> Result<bool> {
        Ok(true)
    }
}

/// JSON serializer, pretty-printed by default.
#[derive(Debug, Clone, Copy)]
pub struct JsonSerializer {
    pub pretty: bool,
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ManifestSerializer for JsonSerializer {
    fn serialize(&self, manifest: &Manifest) -> Result<Vec<u8>> {
        let json = if self.pretty {
            manifest.to_json_pretty()?
        } else {
            manifest.to_json()?
        };
        Ok(json.into_bytes())
    }
}

/// Manifest plugin configuration.
///
/// Defaults are applied at construction and checked once by
/// [`ManifestOptions::validate`]; builds never re-merge options.
///
/// # Example
///
/// ```rust
/// use fob_manifest::ManifestOptions;
///
/// let options = ManifestOptions::new()
///     .with_filename("assets/manifest.json")
///     .with_public_path("/static/")
///     .with_chunks(true);
///
/// options.validate().unwrap();
/// ```
#[derive(Clone)]
pub struct ManifestOptions {
    /// Artifact path, relative to the output directory unless absolute.
    pub filename: PathBuf,
    /// Prefix for every entry name.
    pub base_path: String,
    /// Prefix for every file; `None` uses the host's public path.
    pub public_path: Option<String>,
    /// Collect descendant chunk group files into `chunks`.
    pub chunks: bool,
    /// Register the artifact with the host asset registry.
    pub emit_asset: bool,
    /// Write the artifact to disk through the runtime.
    pub write_to_disk: bool,
    pub map: Arc<dyn PathMap>,
    pub filter: Arc<dyn PathFilter>,
    pub serializer: Arc<dyn ManifestSerializer>,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_FILENAME),
            base_path: String::new(),
            public_path: None,
            chunks: false,
            emit_asset: true,
            write_to_disk: false,
            map: Arc::new(IdentityMap),
            filter: Arc::new(AcceptAll),
            serializer: Arc::new(JsonSerializer::default()),
        }
    }
}

impl fmt::Debug for ManifestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestOptions")
            .field("filename", &self.filename)
            .field("base_path", &self.base_path)
            .field("public_path", &self.public_path)
            .field("chunks", &self.chunks)
            .field("emit_asset", &self.emit_asset)
            .field("write_to_disk", &self.write_to_disk)
            .finish_non_exhaustive()
    }
}

impl ManifestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_public_path(mut self, public_path: impl Into<String>) -> Self {
        self.public_path = Some(public_path.into());
        self
    }

    pub fn with_chunks(mut self, chunks: bool) -> Self {
        self.chunks = chunks;
        self
    }

    pub fn with_emit_asset(mut self, emit_asset: bool) -> Self {
        self.emit_asset = emit_asset;
        self
    }

    pub fn with_write_to_disk(mut self, write_to_disk: bool) -> Self {
        self.write_to_disk = write_to_disk;
        self
    }

    pub fn with_map(mut self, map: impl PathMap + 'static) -> Self {
        self.map = Arc::new(map);
        self
    }

    pub fn with_filter(mut self, filter: impl PathFilter + 'static) -> Self {
        self.filter = Arc::new(filter);
        self
    }

    pub fn with_serializer(mut self, serializer: impl ManifestSerializer + 'static) -> Self {
        self.serializer = Arc::new(serializer);
        self
    }

    /// Serialize as compact single-line JSON.
    pub fn compact(self) -> Self {
        self.with_serializer(JsonSerializer { pretty: false })
    }

    /// Public path for this build: the configured one, else the host's.
    pub fn resolve_public_path<'a>(&'a self, host_public_path: &'a str) -> &'a str {
        self.public_path.as_deref().unwrap_or(host_public_path)
    }

    pub fn validate(&self) -> Result<()> {
        let raw = self.filename.to_string_lossy();
        if raw.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "manifest filename cannot be empty".to_string(),
            ));
        }

        if raw.ends_with('/') || raw.ends_with('\\') || !names_file(&self.filename) {
            return Err(Error::InvalidOutputPath(raw.into_owned()));
        }

        if !self.emit_asset && !self.write_to_disk {
            return Err(Error::InvalidConfig(
                "manifest must be emitted as an asset, written to disk, or both".to_string(),
            ));
        }

        Ok(())
    }
}

fn names_file(path: &Path) -> bool {
    matches!(path.components().next_back(), Some(Component::Normal(_)))
}
