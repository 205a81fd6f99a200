//! Host-facing data model.
//!
//! A bundler host describes its finalized output as a [`ChunkGraph`]: an arena of
//! chunks (each with its ordered output files) and chunk groups (ordered chunks
//! plus descendant groups). Groups reference each other by [`GroupId`], so async
//! cycles between groups are representable.
//!
//! ```text
//! entry "main" ──▶ GroupId(0) ── chunks ──▶ [ChunkId(0), ChunkId(1)]
//!                      │
//!                      └─ children ──▶ GroupId(1) ── chunks ──▶ [ChunkId(2)]
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Index of a chunk inside a [`ChunkGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(usize);

/// Index of a chunk group inside a [`ChunkGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl ChunkId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A unit of output carrying an ordered list of relative file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    id: String,
    name: Option<String>,
    files: Vec<String>,
}

impl Chunk {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            files: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Output files in emission order, relative to the output directory.
    pub fn files(&self) -> &[String] {
        &self.files
    }
}

/// Ordered chunks plus descendant (async-loaded) groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkGroup {
    name: Option<String>,
    chunks: Vec<ChunkId>,
    children: Vec<GroupId>,
}

impl ChunkGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn chunks(&self) -> &[ChunkId] {
        &self.chunks
    }

    pub fn children(&self) -> &[GroupId] {
        &self.children
    }
}

/// Arena holding every chunk and chunk group of one compilation.
#[derive(Debug, Clone, Default)]
pub struct ChunkGraph {
    chunks: Vec<Chunk>,
    groups: Vec<ChunkGroup>,
}

impl ChunkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_chunk(&mut self, chunk: Chunk) -> ChunkId {
        self.chunks.push(chunk);
        ChunkId(self.chunks.len() - 1)
    }

    pub fn add_group(&mut self, group: ChunkGroup) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    /// Append `chunk` to the chunk list of `group`.
    ///
    /// Returns `false` when either id does not belong to this graph.
    pub fn push_chunk(&mut self, group: GroupId, chunk: ChunkId) -> bool {
        if chunk.0 >= self.chunks.len() {
            return false;
        }
        match self.groups.get_mut(group.0) {
            Some(g) => {
                g.chunks.push(chunk);
                true
            }
            None => false,
        }
    }

    /// Register `child` as a descendant group of `parent`.
    ///
    /// Returns `false` when either id does not belong to this graph.
    pub fn connect(&mut self, parent: GroupId, child: GroupId) -> bool {
        if child.0 >= self.groups.len() {
            return false;
        }
        match self.groups.get_mut(parent.0) {
            Some(g) => {
                g.children.push(child);
                true
            }
            None => false,
        }
    }

    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0)
    }

    pub fn group(&self, id: GroupId) -> Option<&ChunkGroup> {
        self.groups.get(id.0)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Entry structure as exposed by the host.
///
/// Hosts either hand over a native ordered map or a plain property-keyed object
/// whose keys enumerate with object-property ordering rules.
#[derive(Debug, Clone)]
pub enum HostEntrypoints {
    /// Ordered map; iteration order is taken as-is.
    Map(IndexMap<String, GroupId>),
    /// Property-keyed object, listed in key insertion order.
    Properties(Vec<(String, GroupId)>),
}

/// Raw bytes registered as a build asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    bytes: Vec<u8>,
}

impl RawSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn source(&self) -> &[u8] {
        &self.bytes
    }

    /// Declared byte length of the asset.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Build state exposed by the host once output is finalized.
pub trait Compilation {
    /// Absolute output directory of the build.
    fn output_path(&self) -> &Path;

    /// Public base URL configured on the host.
    fn public_path(&self) -> &str;

    /// Finalized chunk graph.
    fn chunk_graph(&self) -> &ChunkGraph;

    /// Entry structure, or `None` when the host exposes no supported shape.
    fn entrypoints(&self) -> Option<HostEntrypoints>;

    /// Register an asset the host emits with the rest of the output.
    fn emit_asset(&mut self, name: String, source: RawSource);
}

/// Owned [`Compilation`] snapshot.
///
/// Adapters translate their host's output into a snapshot, run the manifest
/// plugin against it, then copy [`BuildSnapshot::assets`] back to the host.
#[derive(Debug, Clone)]
pub struct BuildSnapshot {
    output_path: PathBuf,
    public_path: String,
    graph: ChunkGraph,
    entrypoints: Option<HostEntrypoints>,
    assets: IndexMap<String, RawSource>,
}

impl BuildSnapshot {
    pub fn new(output_path: impl Into<PathBuf>, graph: ChunkGraph) -> Self {
        Self {
            output_path: output_path.into(),
            public_path: String::new(),
            graph,
            entrypoints: None,
            assets: IndexMap::new(),
        }
    }

    pub fn with_public_path(mut self, public_path: impl Into<String>) -> Self {
        self.public_path = public_path.into();
        self
    }

    pub fn with_entrypoints(mut self, entrypoints: HostEntrypoints) -> Self {
        self.entrypoints = Some(entrypoints);
        self
    }

    /// Assets registered through [`Compilation::emit_asset`], in emission order.
    pub fn assets(&self) -> &IndexMap<String, RawSource> {
        &self.assets
    }

    pub fn into_assets(self) -> IndexMap<String, RawSource> {
        self.assets
    }
}

impl Compilation for BuildSnapshot {
    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn public_path(&self) -> &str {
        &self.public_path
    }

    fn chunk_graph(&self) -> &ChunkGraph {
        &self.graph
    }

    fn entrypoints(&self) -> Option<HostEntrypoints> {
        self.entrypoints.clone()
    }

    fn emit_asset(&mut self, name: String, source: RawSource) {
        self.assets.insert(name, source);
    }
}
