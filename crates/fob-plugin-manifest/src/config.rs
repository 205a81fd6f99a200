use std::path::PathBuf;

use fob_manifest::ManifestOptions;

/// Configuration for [`crate::FobManifestPlugin`].
#[derive(Debug, Clone)]
pub struct ManifestPluginOptions {
    /// Manifest settings and strategies.
    pub manifest: ManifestOptions,
    /// Override for the bundle output directory. `None` uses rolldown's `dir`;
    /// relative values resolve against rolldown's `cwd`.
    pub output_dir: Option<PathBuf>,
    /// Host public path, used when `manifest.public_path` is unset.
    pub public_path: String,
}

impl Default for ManifestPluginOptions {
    fn default() -> Self {
        Self {
            manifest: ManifestOptions::default(),
            output_dir: None,
            public_path: String::new(),
        }
    }
}

impl ManifestPluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest(mut self, manifest: ManifestOptions) -> Self {
        self.manifest = manifest;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_public_path(mut self, public_path: impl Into<String>) -> Self {
        self.public_path = public_path.into();
        self
    }
}
