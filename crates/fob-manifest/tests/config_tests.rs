//! Configuration discovery tests.

use std::fs;
use std::path::PathBuf;

use fob_manifest::{ConfigDiscovery, Error, ManifestConfig};
use tempfile::TempDir;

#[test]
fn test_defaults_without_config() {
    let dir = TempDir::new().unwrap();
    let discovery = ConfigDiscovery::new(dir.path());

    assert!(discovery.find().is_none());
    assert_eq!(discovery.load().unwrap(), ManifestConfig::default());
}

#[test]
fn test_loads_manifest_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("manifest.toml"),
        "filename = \"assets/entries.json\"\nchunks = true\npretty = false\n",
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.filename, PathBuf::from("assets/entries.json"));
    assert!(config.chunks);
    assert!(!config.pretty);

    let options = config.into_options().unwrap();
    assert!(options.chunks);
}

#[test]
fn test_loads_package_json_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "app",
            "manifest": { "basePath": "app-", "publicPath": "/static/", "writeToDisk": true }
        }"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert_eq!(discovery.find(), Some(dir.path().join("package.json")));

    let config = discovery.load().unwrap();
    assert_eq!(config.base_path, "app-");
    assert_eq!(config.public_path.as_deref(), Some("/static/"));
    assert!(config.write_to_disk);
    assert!(config.emit_asset);
}

#[test]
fn test_package_json_without_field_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "app" }"#).unwrap();

    assert!(ConfigDiscovery::new(dir.path()).find().is_none());
}

#[test]
fn test_manifest_toml_takes_precedence() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("manifest.toml"), "basePath = \"toml-\"\n").unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{ "manifest": { "basePath": "pkg-" } }"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.base_path, "toml-");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("manifest.toml"), "chunks = \"yes\"\n").unwrap();

    let err = ConfigDiscovery::new(dir.path()).load().unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}
