//! Property-based tests for manifest construction.
//!
//! Random entries are built from a small pool of file names so duplicates
//! within and across chunks are common.

mod helpers;

use std::collections::HashSet;

use fob_manifest::options::filter_fn;
use fob_manifest::{FileKind, ManifestOptions, ManifestPlugin};
use helpers::TestGraph;
use proptest::prelude::*;

/// File names drawn from a narrow pool: scripts, stylesheets and sourcemaps.
fn file_strategy() -> impl Strategy<Value = String> {
    ("[a-d]", prop::sample::select(vec!["js", "css", "js.map", "CSS"]))
        .prop_map(|(stem, ext)| format!("{stem}.{ext}"))
}

/// Chunks of one entry, each a list of files.
fn chunks_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::vec(file_strategy(), 0..6), 0..4)
}

fn build_graph(entry: &[Vec<String>], child: &[Vec<String>]) -> TestGraph {
    let mut graph = TestGraph::new();
    let entry_files: Vec<Vec<&str>> = entry
        .iter()
        .map(|files| files.iter().map(String::as_str).collect())
        .collect();
    let entry_refs: Vec<&[&str]> = entry_files.iter().map(Vec::as_slice).collect();
    let main = graph.entry("main", &entry_refs);

    let child_files: Vec<Vec<&str>> = child
        .iter()
        .map(|files| files.iter().map(String::as_str).collect())
        .collect();
    let child_refs: Vec<&[&str]> = child_files.iter().map(Vec::as_slice).collect();
    graph.child(main, &child_refs);
    graph
}

fn has_duplicates(list: &[String]) -> bool {
    let mut seen = HashSet::new();
    list.iter().any(|item| !seen.insert(item))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: no file appears twice across `js`, `css` and `chunks` of one entry
    #[test]
    fn prop_entry_files_are_unique(entry in chunks_strategy(), child in chunks_strategy()) {
        let snapshot = build_graph(&entry, &child).snapshot("/dist", "/");
        let plugin = ManifestPlugin::new(ManifestOptions::new().with_chunks(true)).unwrap();
        let manifest = plugin.build(&snapshot).unwrap();

        let files: Vec<String> = manifest.get("main").unwrap().files().map(str::to_string).collect();
        prop_assert!(!has_duplicates(&files));
    }

    /// Property: `js` holds only scripts, `css` only stylesheets
    #[test]
    fn prop_lists_are_partitioned_by_kind(entry in chunks_strategy()) {
        let snapshot = build_graph(&entry, &[]).snapshot("/dist", "");
        let plugin = ManifestPlugin::new(ManifestOptions::new()).unwrap();
        let manifest = plugin.build(&snapshot).unwrap();
        let main = manifest.get("main").unwrap();

        prop_assert!(main.js.iter().all(|f| FileKind::of(f) == FileKind::Script));
        prop_assert!(main.css.iter().all(|f| FileKind::of(f) == FileKind::Stylesheet));

        let expected: HashSet<&str> = entry
            .iter()
            .flatten()
            .filter(|f| FileKind::of(f) != FileKind::Other)
            .map(String::as_str)
            .collect();
        let actual: HashSet<&str> = main.js.iter().chain(&main.css).map(String::as_str).collect();
        prop_assert_eq!(expected, actual);
    }

    /// Property: a rejected file never shows up anywhere in the entry
    #[test]
    fn prop_filtered_files_are_excluded(
        entry in chunks_strategy(),
        child in chunks_strategy(),
        rejected in "[a-d]",
    ) {
        let snapshot = build_graph(&entry, &child).snapshot("/dist", "/");
        let prefix = format!("/{rejected}.");
        let options = ManifestOptions::new()
            .with_chunks(true)
            .with_filter(filter_fn(move |path, _| Ok(!path.starts_with(&prefix))));
        let manifest = ManifestPlugin::new(options).unwrap().build(&snapshot).unwrap();

        let stem = format!("/{rejected}.");
        prop_assert!(manifest.get("main").unwrap().files().all(|f| !f.starts_with(&stem)));
    }

    /// Property: building twice yields byte-identical output
    #[test]
    fn prop_build_is_deterministic(entry in chunks_strategy(), child in chunks_strategy()) {
        let plugin = ManifestPlugin::new(ManifestOptions::new().with_chunks(true)).unwrap();
        let first = plugin.build(&build_graph(&entry, &child).snapshot("/dist", "/")).unwrap();
        let second = plugin.build(&build_graph(&entry, &child).snapshot("/dist", "/")).unwrap();

        prop_assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}
