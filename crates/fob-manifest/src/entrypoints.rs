//! Entrypoint resolution.
//!
//! Normalizes the host's entry structure into one ordered mapping from entry
//! name to the entry's chunk group. Callers never see the raw host shape.

use indexmap::IndexMap;

use crate::host::{Compilation, GroupId, HostEntrypoints};
use crate::{Error, Result};

/// Ordered mapping from entry name to its chunk group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entrypoints {
    entries: IndexMap<String, GroupId>,
}

impl Entrypoints {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<GroupId> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, GroupId)> {
        self.entries.iter().map(|(name, group)| (name.as_str(), *group))
    }
}

impl From<HostEntrypoints> for Entrypoints {
    fn from(host: HostEntrypoints) -> Self {
        match host {
            HostEntrypoints::Map(entries) => Self { entries },
            HostEntrypoints::Properties(props) => Self {
                entries: order_properties(props),
            },
        }
    }
}

/// Resolve the ordered entry view of `compilation`.
///
/// Fails with [`Error::UnsupportedEntrypoints`] when the host exposes neither
/// an ordered map nor a property-keyed object.
pub fn resolve_entrypoints<C: Compilation + ?Sized>(compilation: &C) -> Result<Entrypoints> {
    let host = compilation.entrypoints().ok_or_else(|| {
        Error::UnsupportedEntrypoints(
            "host exposes neither an entrypoint map nor an entrypoint object".to_string(),
        )
    })?;

    let entrypoints = Entrypoints::from(host);
    tracing::debug!(entries = entrypoints.len(), "resolved entrypoints");
    Ok(entrypoints)
}

/// Apply property enumeration order: array-index keys ascending, then the
/// remaining keys in insertion order. Re-assigned keys keep their first slot.
fn order_properties(props: Vec<(String, GroupId)>) -> IndexMap<String, GroupId> {
    let mut indexed: Vec<(u32, String, GroupId)> = Vec::new();
    let mut named: IndexMap<String, GroupId> = IndexMap::new();

    for (key, group) in props {
        match array_index(&key) {
            Some(index) => match indexed.iter_mut().find(|(i, _, _)| *i == index) {
                Some(slot) => slot.2 = group,
                None => indexed.push((index, key, group)),
            },
            None => {
                named.insert(key, group);
            }
        }
    }

    indexed.sort_by_key(|(index, _, _)| *index);

    indexed
        .into_iter()
        .map(|(_, key, group)| (key, group))
        .chain(named)
        .collect()
}

/// Canonical array index: decimal, no leading zeros, below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|index| *index != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{BuildSnapshot, ChunkGraph, ChunkGroup};

    fn groups(n: usize) -> (ChunkGraph, Vec<GroupId>) {
        let mut graph = ChunkGraph::new();
        let ids = (0..n).map(|_| graph.add_group(ChunkGroup::new())).collect();
        (graph, ids)
    }

    #[test]
    fn test_map_shape_keeps_order() {
        let (graph, ids) = groups(3);
        let mut map = IndexMap::new();
        map.insert("zeta".to_string(), ids[0]);
        map.insert("alpha".to_string(), ids[1]);
        map.insert("10".to_string(), ids[2]);

        let snapshot =
            BuildSnapshot::new("/dist", graph).with_entrypoints(HostEntrypoints::Map(map));
        let entrypoints = resolve_entrypoints(&snapshot).unwrap();

        let names: Vec<_> = entrypoints.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "10"]);
        assert_eq!(entrypoints.get("alpha"), Some(ids[1]));
    }

    #[test]
    fn test_properties_shape_orders_index_keys_first() {
        let (graph, ids) = groups(5);
        let props = vec![
            ("main".to_string(), ids[0]),
            ("10".to_string(), ids[1]),
            ("admin".to_string(), ids[2]),
            ("2".to_string(), ids[3]),
            ("01".to_string(), ids[4]),
        ];

        let snapshot = BuildSnapshot::new("/dist", graph)
            .with_entrypoints(HostEntrypoints::Properties(props));
        let entrypoints = resolve_entrypoints(&snapshot).unwrap();

        let names: Vec<_> = entrypoints.names().collect();
        assert_eq!(names, vec!["2", "10", "main", "admin", "01"]);
    }

    #[test]
    fn test_properties_reassignment_keeps_first_position() {
        let (_, ids) = groups(3);
        let props = vec![
            ("main".to_string(), ids[0]),
            ("admin".to_string(), ids[1]),
            ("main".to_string(), ids[2]),
        ];

        let entrypoints = Entrypoints::from(HostEntrypoints::Properties(props));
        let resolved: Vec<_> = entrypoints.iter().collect();
        assert_eq!(resolved, vec![("main", ids[2]), ("admin", ids[1])]);
    }

    #[test]
    fn test_missing_shape_is_an_error() {
        let snapshot = BuildSnapshot::new("/dist", ChunkGraph::new());
        let err = resolve_entrypoints(&snapshot).unwrap_err();
        assert!(matches!(err, Error::UnsupportedEntrypoints(_)));
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("007"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("4294967294"), Some(4_294_967_294));
    }
}
