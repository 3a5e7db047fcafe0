// tests/config_test.rs
use dove::config::{ConfigStore, VersionConfig, CONFIG_FILE};
use dove::domain::Version;
use dove::DoveError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &TempDir, contents: &str) -> ConfigStore {
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, contents).unwrap();
    ConfigStore::new(path)
}

#[test]
fn test_locate_defaults_to_working_dir() {
    let store = ConfigStore::locate(Path::new("/project"), None);
    assert_eq!(store.path(), Path::new("/project/dove.json"));
}

#[test]
fn test_locate_resolves_relative_paths_against_working_dir() {
    let store = ConfigStore::locate(Path::new("/project"), Some(Path::new("ci/image.json")));
    assert_eq!(store.path(), Path::new("/project/ci/image.json"));
}

#[cfg(unix)]
#[test]
fn test_locate_keeps_absolute_paths() {
    let store = ConfigStore::locate(Path::new("/project"), Some(Path::new("/etc/dove.json")));
    assert_eq!(store.path(), Path::new("/etc/dove.json"));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let store = write(
        &dir,
        r#"{
    "alternate_formats": {"latest": "myapp:latest"},
    "format": "myapp:{0}.{1}.{2}",
    "version": "1.2.3"
}"#,
    );

    let config = store.load().unwrap();
    assert_eq!(config.version, Version::parse("1.2.3"));
    assert_eq!(config.format, "myapp:{0}.{1}.{2}");
    assert_eq!(
        config.alternate_formats.get("latest"),
        Some(&"myapp:latest".to_string())
    );
}

#[test]
fn test_load_without_alternates() {
    let dir = TempDir::new().unwrap();
    let store = write(&dir, r#"{"format": "app:{0}", "version": "4"}"#);
    let config = store.load().unwrap();
    assert!(config.alternate_formats.is_empty());
}

#[test]
fn test_load_accepts_camel_case_alternates() {
    let dir = TempDir::new().unwrap();
    let store = write(
        &dir,
        r#"{"alternateFormats": {"edge": "app:edge"}, "format": "app:{0}", "version": "4"}"#,
    );
    let config = store.load().unwrap();
    assert_eq!(config.alternate_formats.len(), 1);
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::locate(dir.path(), None);
    let err = store.load().unwrap_err();
    assert!(matches!(err, DoveError::ConfigNotFound { .. }));
}

#[test]
fn test_load_missing_required_keys() {
    let dir = TempDir::new().unwrap();

    let store = write(&dir, r#"{"format": "app:{0}"}"#);
    let err = store.load().unwrap_err();
    assert!(matches!(err, DoveError::ConfigInvalid(_)));
    assert!(err.to_string().contains("version"));

    let store = write(&dir, r#"{"version": "1.0.0"}"#);
    let err = store.load().unwrap_err();
    assert!(matches!(err, DoveError::ConfigInvalid(_)));
    assert!(err.to_string().contains("format"));
}

#[test]
fn test_load_malformed_json() {
    let dir = TempDir::new().unwrap();
    let store = write(&dir, "{ not json");
    assert!(matches!(store.load(), Err(DoveError::ConfigInvalid(_))));
}

#[test]
fn test_save_writes_sorted_indented_json() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::locate(dir.path(), None);

    let mut config = VersionConfig::new("myapp:{0}.{1}.{2}", Version::parse("1.2.3"));
    config
        .alternate_formats
        .insert("minor".to_string(), "myapp:{0}.{1}".to_string());
    config
        .alternate_formats
        .insert("latest".to_string(), "myapp:latest".to_string());
    store.save(&config).unwrap();

    let written = fs::read_to_string(store.path()).unwrap();
    let expected = r#"{
    "alternate_formats": {
        "latest": "myapp:latest",
        "minor": "myapp:{0}.{1}"
    },
    "format": "myapp:{0}.{1}.{2}",
    "version": "1.2.3"
}
"#;
    assert_eq!(written, expected);
}

#[test]
fn test_save_omits_empty_alternates() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::locate(dir.path(), None);
    store
        .save(&VersionConfig::new("app:{0}", Version::parse("1")))
        .unwrap();

    let written = fs::read_to_string(store.path()).unwrap();
    assert!(!written.contains("alternate_formats"));
}

#[test]
fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::locate(dir.path(), None);
    let config = VersionConfig::new("app:{0}.{1}-{2}", Version::parse("2024.10.rc"));

    store.save(&config).unwrap();
    assert_eq!(store.load().unwrap(), config);
}

#[test]
fn test_render_primary_and_alternate() {
    let mut config = VersionConfig::new("myapp:{0}.{1}.{2}", Version::parse("1.2.4"));
    config
        .alternate_formats
        .insert("latest".to_string(), "myapp:latest".to_string());

    assert_eq!(config.render(None).unwrap(), "myapp:1.2.4");
    assert_eq!(config.render(Some("latest")).unwrap(), "myapp:latest");
    assert!(matches!(
        config.render(Some("nightly")),
        Err(DoveError::AlternateNotFound(_))
    ));
}

#[test]
fn test_save_drops_unknown_keys() {
    let dir = TempDir::new().unwrap();
    let store = write(
        &dir,
        r#"{"format": "app:{0}", "owner": "platform", "version": "1"}"#,
    );

    let config = store.load().unwrap();
    store
        .save(&config.with_version(config.version.bump(&[0]).unwrap()))
        .unwrap();

    let written = fs::read_to_string(store.path()).unwrap();
    assert!(!written.contains("owner"));
    assert!(written.contains("\"version\": \"2\""));
}
