//! Rolldown plugin emitting an entry manifest
//!
//! Hooks into `generate_bundle`, after rolldown has finalized every chunk, and
//! adds one more asset to the bundle: a mapping from entry name to the entry's
//! JavaScript and CSS files (plus, optionally, its lazily loaded chunks).
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_manifest::ManifestOptions;
//! use fob_plugin_manifest::{FobManifestPlugin, ManifestPluginOptions};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ManifestPluginOptions::new()
//!     .with_public_path("/static/")
//!     .with_manifest(ManifestOptions::new().with_chunks(true));
//!
//! // Use with your Rolldown bundler configuration
//! let plugin = Arc::new(FobManifestPlugin::new(options)?);
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use fob_manifest::{BuildSnapshot, HostEntrypoints, ManifestPlugin, RawSource};
use indexmap::IndexMap;
use rolldown_common::{Output, OutputAsset, StrOrBytes};
use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};

mod bundle;
mod config;

pub use bundle::{BundleAsset, BundleChunk, BundleGraph, BundleOutput};
pub use config::ManifestPluginOptions;

/// Rolldown plugin that emits the entry manifest as a bundle asset
///
/// # Architecture
///
/// ```text
/// bundle outputs → BundleGraph → BuildSnapshot → ManifestPlugin::emit → OutputAsset
/// ```
#[derive(Debug, Clone)]
pub struct FobManifestPlugin {
    manifest: ManifestPlugin,
    options: ManifestPluginOptions,
}

impl FobManifestPlugin {
    /// Create the plugin; manifest options are validated here.
    pub fn new(options: ManifestPluginOptions) -> fob_manifest::Result<Self> {
        Ok(Self {
            manifest: ManifestPlugin::new(options.manifest.clone())?,
            options,
        })
    }

    /// Create the plugin around an existing [`ManifestPlugin`], e.g. one with a
    /// custom runtime.
    pub fn with_manifest_plugin(manifest: ManifestPlugin, options: ManifestPluginOptions) -> Self {
        Self { manifest, options }
    }

    pub fn options(&self) -> &ManifestPluginOptions {
        &self.options
    }

    /// Directory the bundle is written to: the configured override, else
    /// rolldown's `out_dir`, both relative to `cwd`.
    pub fn output_path(&self, cwd: &Path, out_dir: &str) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.join(out_dir),
        }
    }

    /// Snapshot of `outputs` as seen by the manifest builder.
    pub fn snapshot(&self, outputs: &[BundleOutput], output_path: &Path) -> BuildSnapshot {
        let BundleGraph { graph, entries } = BundleGraph::from_outputs(outputs);

        BuildSnapshot::new(output_path, graph)
            .with_public_path(self.options.public_path.clone())
            .with_entrypoints(HostEntrypoints::Map(entries))
    }

    /// Build and emit the manifest for `outputs` written under `output_path`,
    /// returning the assets to add to the bundle.
    pub async fn manifest_assets(
        &self,
        outputs: &[BundleOutput],
        output_path: &Path,
    ) -> fob_manifest::Result<IndexMap<String, RawSource>> {
        let mut snapshot = self.snapshot(outputs, output_path);
        self.manifest.emit(&mut snapshot).await?;
        Ok(snapshot.into_assets())
    }
}

impl Plugin for FobManifestPlugin {
    fn name(&self) -> Cow<'static, str> {
        ManifestPlugin::NAME.into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let plugin = self.clone();

        async move {
            let outputs: Vec<BundleOutput> =
                args.bundle.iter().map(BundleOutput::from_rolldown).collect();
            let output_path = plugin.output_path(&args.options.cwd, &args.options.out_dir);

            let assets = plugin
                .manifest_assets(&outputs, &output_path)
                .await
                .context("Failed to emit entry manifest")?;

            args.bundle
                .extend(assets.into_iter().map(|(name, source)| make_asset(name, source)));

            Ok(())
        }
    }
}

fn make_asset(filename: String, source: RawSource) -> Output {
    let source = match String::from_utf8(source.into_bytes()) {
        Ok(text) => StrOrBytes::Str(text),
        Err(err) => StrOrBytes::Bytes(err.into_bytes()),
    };

    let asset = OutputAsset {
        names: vec![],
        original_file_names: vec![],
        filename: filename.into(),
        source,
    };
    Output::Asset(Arc::new(asset))
}
