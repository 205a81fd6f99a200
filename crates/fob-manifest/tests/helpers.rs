//! Shared test utilities for fob-manifest tests

#![allow(dead_code)]

use fob_manifest::{
    BuildSnapshot, Chunk, ChunkGraph, ChunkGroup, ChunkId, GroupId, HostEntrypoints,
};
use indexmap::IndexMap;
use std::path::Path;

/// Small builder for chunk graphs used across the integration tests.
#[derive(Default)]
pub struct TestGraph {
    pub graph: ChunkGraph,
    entries: Vec<(String, GroupId)>,
}

impl TestGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk carrying `files`.
    pub fn chunk(&mut self, id: &str, files: &[&str]) -> ChunkId {
        self.graph
            .add_chunk(Chunk::new(id).with_files(files.iter().copied()))
    }

    /// Add an entry whose group holds the given existing chunks.
    pub fn entry_with(&mut self, name: &str, chunks: &[ChunkId]) -> GroupId {
        let group = self.group(Some(name), chunks);
        self.entries.push((name.to_string(), group));
        group
    }

    /// Add an entry with one fresh chunk per file list.
    pub fn entry(&mut self, name: &str, chunks: &[&[&str]]) -> GroupId {
        let ids: Vec<ChunkId> = chunks
            .iter()
            .enumerate()
            .map(|(i, files)| self.chunk(&format!("{name}-{i}"), files))
            .collect();
        self.entry_with(name, &ids)
    }

    /// Add a descendant group under `parent` with one fresh chunk per file list.
    pub fn child(&mut self, parent: GroupId, chunks: &[&[&str]]) -> GroupId {
        let ids: Vec<ChunkId> = chunks
            .iter()
            .enumerate()
            .map(|(i, files)| self.chunk(&format!("async-{}-{i}", parent.index()), files))
            .collect();
        let group = self.group(None, &ids);
        self.graph.connect(parent, group);
        group
    }

    /// Group of a previously added entry.
    pub fn entry_group(&self, name: &str) -> GroupId {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, group)| *group)
            .unwrap_or_else(|| panic!("no entry named {name}"))
    }

    pub fn connect(&mut self, parent: GroupId, child: GroupId) {
        assert!(self.graph.connect(parent, child));
    }

    fn group(&mut self, name: Option<&str>, chunks: &[ChunkId]) -> GroupId {
        let group = match name {
            Some(name) => self.graph.add_group(ChunkGroup::named(name)),
            None => self.graph.add_group(ChunkGroup::new()),
        };
        for chunk in chunks {
            assert!(self.graph.push_chunk(group, *chunk));
        }
        group
    }

    /// Snapshot exposing the entries as an ordered map.
    pub fn snapshot(self, output_path: impl AsRef<Path>, public_path: &str) -> BuildSnapshot {
        let entries: IndexMap<String, GroupId> = self.entries.into_iter().collect();
        BuildSnapshot::new(output_path.as_ref(), self.graph)
            .with_public_path(public_path)
            .with_entrypoints(HostEntrypoints::Map(entries))
    }

    /// Snapshot exposing the entries as a property-keyed object.
    pub fn snapshot_properties(
        self,
        output_path: impl AsRef<Path>,
        public_path: &str,
    ) -> BuildSnapshot {
        BuildSnapshot::new(output_path.as_ref(), self.graph)
            .with_public_path(public_path)
            .with_entrypoints(HostEntrypoints::Properties(self.entries))
    }
}

/// The `main` entry used throughout: one chunk, script + stylesheet + vendor script.
pub fn main_entry() -> TestGraph {
    let mut graph = TestGraph::new();
    graph.entry(
        "main",
        &[&["main.abc123.js", "main.abc123.css", "vendor.def456.js"]],
    );
    graph
}
