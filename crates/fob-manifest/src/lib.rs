#![cfg_attr(docsrs, feature(doc_cfg))]

//! # fob-manifest
//!
//! Entry manifests for bundler output.
//!
//! After a build has finalized its chunks, this crate projects the chunk graph
//! into a flat mapping from entry name to the entry's output files:
//!
//! ```json
//! { "main": { "js": ["/static/main.js"], "css": ["/static/main.css"] } }
//! ```
//!
//! Hosts describe their output through the [`Compilation`] trait (or build a
//! [`BuildSnapshot`]); [`ManifestPlugin::emit`] resolves entrypoints, builds the
//! manifest, registers it as an asset and optionally writes it to disk.
//!
//! ## Quick Start
//!
//! ```
//! use fob_manifest::{BuildSnapshot, Chunk, ChunkGraph, ChunkGroup, HostEntrypoints};
//! use fob_manifest::{ManifestOptions, ManifestPlugin};
//! use indexmap::IndexMap;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = ChunkGraph::new();
//! let group = graph.add_group(ChunkGroup::named("main"));
//! let chunk = graph.add_chunk(Chunk::new("main").with_files(["main.js", "main.css"]));
//! graph.push_chunk(group, chunk);
//!
//! let mut entries = IndexMap::new();
//! entries.insert("main".to_string(), group);
//!
//! let mut compilation = BuildSnapshot::new("/app/dist", graph)
//!     .with_public_path("/static/")
//!     .with_entrypoints(HostEntrypoints::Map(entries));
//!
//! let plugin = ManifestPlugin::new(ManifestOptions::new())?;
//! let manifest = plugin.emit(&mut compilation).await?;
//!
//! assert_eq!(manifest.get("main").unwrap().js, vec!["/static/main.js"]);
//! assert!(compilation.assets().contains_key("manifest.json"));
//! # Ok(()) }
//! ```

pub mod builder;
pub mod config;
pub mod emit;
pub mod entrypoints;
pub mod error;
pub mod host;
pub mod manifest;
pub mod options;
pub mod plugin;
pub mod runtime;

// Logging utilities (optional, enabled with "logging" feature)
#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub mod logging;

#[cfg(feature = "logging")]
#[cfg_attr(docsrs, doc(cfg(feature = "logging")))]
pub use logging::{LogLevel, init_logging, init_logging_from_env};

pub use builder::{FileKind, ManifestBuilder, public_file_path};
pub use config::{ConfigDiscovery, ManifestConfig};
pub use entrypoints::{Entrypoints, resolve_entrypoints};
pub use error::{Error, Result};
pub use host::{
    BuildSnapshot, Chunk, ChunkGraph, ChunkGroup, ChunkId, Compilation, GroupId,
    HostEntrypoints, RawSource,
};
pub use manifest::{Manifest, ManifestEntry};
pub use options::{
    AcceptAll, IdentityMap, JsonSerializer, ManifestOptions, ManifestSerializer, PathFilter,
    PathMap,
};
pub use plugin::ManifestPlugin;
pub use runtime::{Runtime, RuntimeError, RuntimeResult};

#[cfg(not(target_family = "wasm"))]
pub use runtime::NativeRuntime;
