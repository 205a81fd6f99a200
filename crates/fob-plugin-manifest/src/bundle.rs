//! Rolldown bundle → chunk graph conversion.
//!
//! Rolldown hands plugins a flat list of output chunks and assets. The manifest
//! needs entry groups with descendants, so the bundle is first copied into
//! plain owned records ([`BundleOutput`]) and then folded into a
//! [`ChunkGraph`]:
//!
//! - every entry chunk opens a named group;
//! - a group holds its root chunk plus the root's transitive static imports,
//!   breadth-first in first-seen order;
//! - each dynamic import of a group member opens a child group built the same
//!   way (one group per dynamic root, shared by every importer).
//!
//! A chunk's files are its own filename, the CSS assets emitted for it (assets
//! named `<chunk name>.css`), then its sourcemap when present.

use std::collections::VecDeque;

use fob_manifest::{Chunk, ChunkGraph, ChunkGroup, ChunkId, GroupId};
use indexmap::IndexMap;
use rolldown_common::Output;
use rustc_hash::{FxHashMap, FxHashSet};

/// Owned copy of a rolldown output chunk, limited to what the manifest needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleChunk {
    pub name: String,
    pub filename: String,
    pub is_entry: bool,
    pub imports: Vec<String>,
    pub dynamic_imports: Vec<String>,
    pub sourcemap_filename: Option<String>,
}

impl BundleChunk {
    pub fn new(name: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            ..Self::default()
        }
    }

    pub fn entry(mut self) -> Self {
        self.is_entry = true;
        self
    }

    pub fn with_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports.extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn with_dynamic_imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dynamic_imports
            .extend(imports.into_iter().map(Into::into));
        self
    }

    pub fn with_sourcemap(mut self, filename: impl Into<String>) -> Self {
        self.sourcemap_filename = Some(filename.into());
        self
    }
}

/// Owned copy of a rolldown output asset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleAsset {
    pub names: Vec<String>,
    pub filename: String,
}

impl BundleAsset {
    pub fn new<I, S>(filename: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutput {
    Chunk(BundleChunk),
    Asset(BundleAsset),
}

impl BundleOutput {
    /// Convert from a rolldown [`Output`].
    pub fn from_rolldown(output: &Output) -> Self {
        match output {
            Output::Chunk(chunk) => Self::Chunk(BundleChunk {
                name: chunk.name.to_string(),
                filename: chunk.filename.to_string(),
                is_entry: chunk.is_entry,
                imports: chunk.imports.iter().map(|s| s.to_string()).collect(),
                dynamic_imports: chunk
                    .dynamic_imports
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                sourcemap_filename: chunk.sourcemap_filename.clone(),
            }),
            Output::Asset(asset) => Self::Asset(BundleAsset {
                names: asset.names.clone(),
                filename: asset.filename.to_string(),
            }),
        }
    }
}

/// Chunk graph of a bundle plus its entries in output order.
#[derive(Debug, Clone, Default)]
pub struct BundleGraph {
    pub graph: ChunkGraph,
    pub entries: IndexMap<String, GroupId>,
}

impl BundleGraph {
    pub fn from_outputs(outputs: &[BundleOutput]) -> Self {
        GraphBuilder::new(outputs).build()
    }
}

struct GraphBuilder<'a> {
    chunks: IndexMap<&'a str, (&'a BundleChunk, ChunkId)>,
    graph: ChunkGraph,
    groups: FxHashMap<&'a str, GroupId>,
    pending: VecDeque<(GroupId, Vec<&'a str>)>,
}

impl<'a> GraphBuilder<'a> {
    fn new(outputs: &'a [BundleOutput]) -> Self {
        let assets: Vec<&BundleAsset> = outputs
            .iter()
            .filter_map(|output| match output {
                BundleOutput::Asset(asset) => Some(asset),
                BundleOutput::Chunk(_) => None,
            })
            .collect();

        let mut graph = ChunkGraph::new();
        let mut chunks = IndexMap::new();

        for output in outputs {
            let BundleOutput::Chunk(chunk) = output else {
                continue;
            };
            if chunks.contains_key(chunk.filename.as_str()) {
                continue;
            }

            let id = graph.add_chunk(
                Chunk::new(chunk.filename.as_str())
                    .with_name(chunk.name.as_str())
                    .with_files(chunk_files(chunk, &assets)),
            );
            chunks.insert(chunk.filename.as_str(), (chunk, id));
        }

        Self {
            chunks,
            graph,
            groups: FxHashMap::default(),
            pending: VecDeque::new(),
        }
    }

    fn build(mut self) -> BundleGraph {
        let roots: Vec<&'a BundleChunk> = self
            .chunks
            .values()
            .filter(|(chunk, _)| chunk.is_entry)
            .map(|(chunk, _)| *chunk)
            .collect();

        let mut entries = IndexMap::new();
        for chunk in roots {
            let group = self.group_for(&chunk.filename, Some(&chunk.name));
            entries.insert(chunk.name.clone(), group);
        }

        while let Some((group, members)) = self.pending.pop_front() {
            for member in members {
                let Some((chunk, _)) = self.chunks.get(member).copied() else {
                    continue;
                };
                for import in &chunk.dynamic_imports {
                    if !self.chunks.contains_key(import.as_str()) {
                        continue;
                    }
                    let child = self.group_for(import, None);
                    self.graph.connect(group, child);
                }
            }
        }

        tracing::debug!(
            chunks = self.graph.chunk_count(),
            groups = self.graph.group_count(),
            entries = entries.len(),
            "converted bundle to chunk graph"
        );

        BundleGraph {
            graph: self.graph,
            entries,
        }
    }

    /// Group rooted at `root`, created on first request.
    fn group_for(&mut self, root: &'a str, name: Option<&str>) -> GroupId {
        if let Some(&group) = self.groups.get(root) {
            return group;
        }

        let group = match name {
            Some(name) => self.graph.add_group(ChunkGroup::named(name)),
            None => self.graph.add_group(ChunkGroup::new()),
        };
        self.groups.insert(root, group);

        let members = self.static_closure(root);
        for member in &members {
            if let Some((_, id)) = self.chunks.get(member) {
                self.graph.push_chunk(group, *id);
            }
        }
        self.pending.push_back((group, members));
        group
    }

    /// `root` and its transitive static imports, breadth-first.
    fn static_closure(&self, root: &'a str) -> Vec<&'a str> {
        let mut order = Vec::new();
        let mut seen: FxHashSet<&'a str> = FxHashSet::default();
        let mut queue = VecDeque::from([root]);
        seen.insert(root);

        while let Some(filename) = queue.pop_front() {
            let Some((chunk, _)) = self.chunks.get(filename).copied() else {
                continue;
            };
            order.push(filename);

            for import in &chunk.imports {
                if seen.insert(import.as_str()) {
                    queue.push_back(import.as_str());
                }
            }
        }

        order
    }
}

fn chunk_files(chunk: &BundleChunk, assets: &[&BundleAsset]) -> Vec<String> {
    let css_name = format!("{}.css", chunk.name);
    let mut files = vec![chunk.filename.clone()];

    files.extend(
        assets
            .iter()
            .filter(|asset| asset.names.iter().any(|name| *name == css_name))
            .map(|asset| asset.filename.clone()),
    );

    if let Some(map) = &chunk.sourcemap_filename {
        files.push(map.clone());
    }

    files
}
