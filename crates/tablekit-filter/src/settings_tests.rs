//! Tests for filter settings persistence

use super::*;
use pretty_assertions::assert_eq;
use tablekit_core::TableKitError;

#[test]
fn test_defaults() {
    let settings = FilterSettings::default();
    assert_eq!(settings.regex_cache_capacity, 100);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_missing_keys_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"unknown_key": true}"#).unwrap();

    assert_eq!(FilterSettings::load_from(&path).unwrap(), FilterSettings::default());
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let settings = FilterSettings {
        regex_cache_capacity: 16,
    };

    settings.save_to(&path).unwrap();
    assert_eq!(FilterSettings::load_from(&path).unwrap(), settings);
}

#[test]
fn test_zero_capacity_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"regex_cache_capacity": 0}"#).unwrap();

    assert!(matches!(
        FilterSettings::load_from(&path),
        Err(TableKitError::Configuration(_))
    ));
}

#[test]
fn test_invalid_json_is_a_serialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        FilterSettings::load_from(&path),
        Err(TableKitError::Serialization(_))
    ));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        FilterSettings::load_from(&dir.path().join("absent.json")),
        Err(TableKitError::Io(_))
    ));
}

#[test]
fn test_engine_from_settings() {
    let engine = FilterEngine::from_settings(&FilterSettings {
        regex_cache_capacity: 2,
    });
    assert_eq!(engine.regex_cache().capacity(), 2);
}

#[test]
fn test_no_config_dir_means_defaults() {
    assert_eq!(
        FilterSettings::load_or_default(None).unwrap(),
        FilterSettings::default()
    );
}

#[test]
fn test_missing_settings_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tablekit").join("settings.json");
    assert_eq!(
        FilterSettings::load_or_default(Some(&path)).unwrap(),
        FilterSettings::default()
    );
}

#[test]
fn test_existing_settings_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"regex_cache_capacity": 7}"#).unwrap();

    let settings = FilterSettings::load_or_default(Some(&path)).unwrap();
    assert_eq!(settings.regex_cache_capacity, 7);
}

#[test]
fn test_settings_path_layout() {
    if let Some(path) = FilterSettings::settings_path() {
        assert!(path.ends_with("tablekit/settings.json"));
    }
}
