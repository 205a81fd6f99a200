use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output files recorded for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Initial script files, public-path qualified, in first-seen order.
    pub js: Vec<String>,

    /// Initial stylesheet files, public-path qualified, in first-seen order.
    pub css: Vec<String>,

    /// Files of descendant (async) chunk groups not already listed above.
    /// Only present when chunk collection is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<Vec<String>>,
}

impl ManifestEntry {
    /// Every file of the entry: `js`, then `css`, then `chunks`.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.js
            .iter()
            .chain(self.css.iter())
            .chain(self.chunks.iter().flatten())
            .map(String::as_str)
    }
}

/// Entry manifest: entry name (with base path) to its output files.
///
/// Serializes as a plain object keyed by entry name, in entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: IndexMap<String, ManifestEntry>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub(crate) fn insert(&mut self, name: String, entry: ManifestEntry) {
        self.entries.insert(name, entry);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
