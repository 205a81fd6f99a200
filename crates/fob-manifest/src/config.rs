//! File-backed manifest configuration.
//!
//! Only the declarative part of [`ManifestOptions`] lives in files; the
//! `map` / `filter` / `serialize` strategies are attached in code afterwards.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::options::{JsonSerializer, ManifestOptions, DEFAULT_FILENAME};
use crate::{Error, Result};

/// Dedicated config file name.
pub const CONFIG_FILE: &str = "manifest.toml";

/// Field holding the configuration inside `package.json`.
pub const PACKAGE_JSON_FIELD: &str = "manifest";

/// Serializable manifest settings.
///
/// ```toml
/// filename = "assets/manifest.json"
/// basePath = "app-"
/// publicPath = "/static/"
/// chunks = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestConfig {
    pub filename: PathBuf,
    pub base_path: String,
    pub public_path: Option<String>,
    pub chunks: bool,
    pub pretty: bool,
    pub emit_asset: bool,
    pub write_to_disk: bool,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_FILENAME),
            base_path: String::new(),
            public_path: None,
            chunks: false,
            pretty: true,
            emit_asset: true,
            write_to_disk: false,
        }
    }
}

impl ManifestConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::InvalidConfig(format!("Invalid TOML in manifest config: {}", e)))
    }

    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| Error::InvalidConfig(format!("Invalid manifest config: {}", e)))
    }

    /// Convert into validated [`ManifestOptions`] with default strategies.
    pub fn into_options(self) -> Result<ManifestOptions> {
        let mut options = ManifestOptions::new()
            .with_filename(self.filename)
            .with_base_path(self.base_path)
            .with_chunks(self.chunks)
            .with_emit_asset(self.emit_asset)
            .with_write_to_disk(self.write_to_disk)
            .with_serializer(JsonSerializer {
                pretty: self.pretty,
            });

        if let Some(public_path) = self.public_path {
            options = options.with_public_path(public_path);
        }

        options.validate()?;
        Ok(options)
    }
}

/// Locates manifest configuration in a project root.
///
/// Searches in this order:
/// 1. `manifest.toml`
/// 2. `package.json` (`manifest` field)
///
/// # Example
///
/// ```no_run
/// use fob_manifest::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// let options = config.into_options().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered configuration, or defaults when there is none.
    pub fn load(&self) -> Result<ManifestConfig> {
        match self.find() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!(root = %self.root.display(), "no manifest config found, using defaults");
                Ok(ManifestConfig::default())
            }
        }
    }

    /// Load configuration from an explicit `manifest.toml` or `package.json`.
    pub fn load_from(path: &Path) -> Result<ManifestConfig> {
        let content = fs::read_to_string(path)?;

        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            let parsed: Value = serde_json::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid JSON in package.json: {}", e)))?;
            let field = parsed.get(PACKAGE_JSON_FIELD).cloned().ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "package.json has no '{}' field",
                    PACKAGE_JSON_FIELD
                ))
            })?;
            return ManifestConfig::from_value(field);
        }

        ManifestConfig::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str() {
        let config = ManifestConfig::from_toml_str(
            r#"
            filename = "assets/manifest.json"
            basePath = "app-"
            publicPath = "/static/"
            chunks = true
            "#,
        )
        .unwrap();

        assert_eq!(config.filename, PathBuf::from("assets/manifest.json"));
        assert_eq!(config.base_path, "app-");
        assert_eq!(config.public_path.as_deref(), Some("/static/"));
        assert!(config.chunks);
        assert!(config.pretty);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = ManifestConfig::from_toml_str("fileName = \"x.json\"").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_into_options_validates() {
        let config = ManifestConfig {
            emit_asset: false,
            ..ManifestConfig::default()
        };
        assert!(config.into_options().is_err());

        let options = ManifestConfig::default().into_options().unwrap();
        assert_eq!(options.filename, PathBuf::from("manifest.json"));
        assert!(options.public_path.is_none());
    }
}
