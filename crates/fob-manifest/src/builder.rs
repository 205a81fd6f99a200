//! Manifest construction.
//!
//! Walks every resolved entry, collecting the output files of its chunk group
//! into `js` / `css` and, when enabled, the files of its descendant groups
//! into `chunks`.
//!
//! # Per-entry walk
//!
//! ```text
//! entry group chunks ──▶ files ──▶ seen? ──▶ filter ──▶ map ──▶ js | css | dropped
//! descendant groups  ──▶ files ──▶ seen? ──▶ filter ──▶ map ──▶ chunks
//! ```
//!
//! A file is evaluated once per entry. Filtering is final: a file rejected
//! while walking the entry chunks is never offered to `chunks`. Seen-sets are
//! local to one entry, so files shared between entries appear in each of them.

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::entrypoints::Entrypoints;
use crate::host::{Chunk, ChunkGraph, ChunkGroup, GroupId};
use crate::manifest::{Manifest, ManifestEntry};
use crate::options::ManifestOptions;
use crate::{Error, Result};

/// Manifest classification of an output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Stylesheet,
    /// Any other extension; not listed under `js` / `css`.
    Other,
}

impl FileKind {
    /// Classify by the (case-insensitive) extension of the raw output path.
    pub fn of(file: &str) -> Self {
        let ext = Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("js") => FileKind::Script,
            Some("css") => FileKind::Stylesheet,
            _ => FileKind::Other,
        }
    }
}

/// Builds a [`Manifest`] from a chunk graph and its resolved entrypoints.
pub struct ManifestBuilder<'a> {
    options: &'a ManifestOptions,
    public_path: &'a str,
}

impl<'a> ManifestBuilder<'a> {
    /// `public_path` is the prefix for every file, usually
    /// [`ManifestOptions::resolve_public_path`] of the host value.
    pub fn new(options: &'a ManifestOptions, public_path: &'a str) -> Self {
        Self {
            options,
            public_path,
        }
    }

    pub fn build(&self, graph: &ChunkGraph, entrypoints: &Entrypoints) -> Result<Manifest> {
        let mut manifest = Manifest::new();

        for (name, group) in entrypoints.iter() {
            let entry = self.build_entry(graph, name, group)?;
            tracing::debug!(
                entry = name,
                js = entry.js.len(),
                css = entry.css.len(),
                chunks = entry.chunks.as_ref().map(Vec::len),
                "collected entry files"
            );
            manifest.insert(format!("{}{}", self.options.base_path, name), entry);
        }

        Ok(manifest)
    }

    fn build_entry(&self, graph: &ChunkGraph, name: &str, id: GroupId) -> Result<ManifestEntry> {
        let group = lookup_group(graph, id, name)?;

        let mut js = Vec::new();
        let mut css = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for chunk in group_chunks(graph, group, name)? {
            for file in chunk.files() {
                let file = normalize_separators(file);
                if !seen.insert(file.clone()) {
                    continue;
                }

                let kind = FileKind::of(&file);
                let Some(path) = self.resolve_file(&file, chunk)? else {
                    continue;
                };

                match kind {
                    FileKind::Script => js.push(path),
                    FileKind::Stylesheet => css.push(path),
                    FileKind::Other => {
                        tracing::trace!(entry = name, file = %file, "skipping non js/css file");
                    }
                }
            }
        }

        let chunks = if self.options.chunks {
            Some(self.collect_descendants(graph, name, id, &seen)?)
        } else {
            None
        };

        Ok(ManifestEntry { js, css, chunks })
    }

    /// Files of every group reachable through `children`, depth-first in
    /// child order. Each group is visited once; the entry group never again.
    fn collect_descendants(
        &self,
        graph: &ChunkGraph,
        name: &str,
        root: GroupId,
        seen: &FxHashSet<String>,
    ) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let mut children_seen: FxHashSet<String> = FxHashSet::default();
        let mut visited: FxHashSet<GroupId> = FxHashSet::default();
        visited.insert(root);

        let root_group = lookup_group(graph, root, name)?;
        let mut stack: Vec<GroupId> = root_group.children().iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }

            let group = lookup_group(graph, id, name)?;
            for chunk in group_chunks(graph, group, name)? {
                for file in chunk.files() {
                    let file = normalize_separators(file);
                    if seen.contains(&file) || !children_seen.insert(file.clone()) {
                        continue;
                    }

                    if let Some(path) = self.resolve_file(&file, chunk)? {
                        files.push(path);
                    }
                }
            }

            stack.extend(group.children().iter().rev().copied());
        }

        Ok(files)
    }

    /// Public path of `file` after `filter` and `map`; `None` when filtered out.
    fn resolve_file(&self, file: &str, chunk: &Chunk) -> Result<Option<String>> {
        let public = public_file_path(self.public_path, file);

        if !self.options.filter.accept(&public, chunk)? {
            tracing::trace!(file = %public, "filtered out");
            return Ok(None);
        }

        self.options.map.map(&public, chunk).map(Some)
    }
}

/// Prefix `file` with `public_path`, using forward slashes in the file part.
pub fn public_file_path(public_path: &str, file: &str) -> String {
    format!("{}{}", public_path, normalize_separators(file))
}

/// Output file name with forward slashes; dedup and classification key on this form.
fn normalize_separators(file: &str) -> String {
    file.replace('\\', "/")
}

fn lookup_group<'g>(graph: &'g ChunkGraph, id: GroupId, entry: &str) -> Result<&'g ChunkGroup> {
    graph.group(id).ok_or_else(|| {
        Error::InvalidGraph(format!(
            "entry '{}' references unknown chunk group #{}",
            entry,
            id.index()
        ))
    })
}

fn group_chunks<'g>(
    graph: &'g ChunkGraph,
    group: &ChunkGroup,
    entry: &str,
) -> Result<Vec<&'g Chunk>> {
    group
        .chunks()
        .iter()
        .map(|&id| {
            graph.chunk(id).ok_or_else(|| {
                Error::InvalidGraph(format!(
                    "entry '{}' references unknown chunk #{}",
                    entry,
                    id.index()
                ))
            })
        })
        .collect()
}
