//! Build-finalize hook.
//!
//! [`ManifestPlugin::emit`] is the blocking hook registration: the host awaits
//! the returned future before it continues asset emission, and the future
//! resolves only after the manifest write has settled.

use std::sync::Arc;

use crate::builder::ManifestBuilder;
use crate::emit::{asset_name, output_file, write_manifest};
use crate::entrypoints::resolve_entrypoints;
use crate::host::{Compilation, RawSource};
use crate::manifest::Manifest;
use crate::options::ManifestOptions;
use crate::runtime::Runtime;
use crate::Result;

/// Entry manifest plugin: options plus the runtime used for disk writes.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    options: ManifestOptions,
    runtime: Arc<dyn Runtime>,
}

impl ManifestPlugin {
    /// Plugin name reported to hosts.
    pub const NAME: &'static str = "fob-manifest";

    /// Create a plugin writing through the native filesystem runtime.
    #[cfg(not(target_family = "wasm"))]
    pub fn new(options: ManifestOptions) -> Result<Self> {
        Self::with_runtime(options, Arc::new(crate::runtime::NativeRuntime::new()))
    }

    /// Create a plugin with a custom runtime. Options are validated once here.
    pub fn with_runtime(options: ManifestOptions, runtime: Arc<dyn Runtime>) -> Result<Self> {
        options.validate()?;
        Ok(Self { options, runtime })
    }

    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// Build the manifest for `compilation` without emitting anything.
    pub fn build<C: Compilation + ?Sized>(&self, compilation: &C) -> Result<Manifest> {
        let entrypoints = resolve_entrypoints(compilation)?;
        let public_path = self.options.resolve_public_path(compilation.public_path());

        ManifestBuilder::new(&self.options, public_path)
            .build(compilation.chunk_graph(), &entrypoints)
    }

    /// Build, serialize, and emit the manifest for `compilation`.
    ///
    /// The serialized bytes are registered as an asset and/or written to disk,
    /// depending on the options. Any failure (including the write) is returned.
    pub async fn emit<C: Compilation + ?Sized>(&self, compilation: &mut C) -> Result<Manifest> {
        let manifest = self.build(compilation)?;
        let bytes = self.options.serializer.serialize(&manifest)?;

        let output_path = compilation.output_path().to_path_buf();
        let name = asset_name(&output_path, &self.options.filename)?;

        if self.options.emit_asset {
            compilation.emit_asset(name.clone(), RawSource::new(bytes.clone()));
        }

        if self.options.write_to_disk {
            let path = output_file(&output_path, &self.options.filename);
            write_manifest(self.runtime.as_ref(), &path, &bytes).await?;
        }

        tracing::info!(
            asset = %name,
            entries = manifest.len(),
            bytes = bytes.len(),
            "emitted entry manifest"
        );

        Ok(manifest)
    }
}
