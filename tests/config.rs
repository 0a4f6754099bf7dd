//! Configuration tests - config paths and cluster config persistence

use std::num::NonZeroUsize;

use sidestep::config::{ClusterConfig, DEFAULT_CONTENT};
use sidestep::config_paths;
use sidestep::model::Session;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.to_string_lossy().contains("sidestep"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

#[test]
fn test_latest_log_file_picks_newest_rotation() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        config_paths::latest_log_file(dir.path()),
        dir.path().join("sidestep.log")
    );

    std::fs::write(dir.path().join("sidestep.log.2026-01-02"), "").unwrap();
    std::fs::write(dir.path().join("sidestep.log.2026-03-01"), "").unwrap();
    std::fs::write(dir.path().join("other.log"), "").unwrap();
    assert_eq!(
        config_paths::latest_log_file(dir.path()),
        dir.path().join("sidestep.log.2026-03-01")
    );
}

// ========================================================================
// Cluster Config Tests
// ========================================================================

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = ClusterConfig {
        widget_count: NonZeroUsize::new(5).unwrap(),
        anchor_pos: 3,
        content: "<p>abc</p>".to_string(),
    };
    config.save_to(&path).unwrap();

    let loaded = ClusterConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = ClusterConfig::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.yaml"));
}

#[test]
fn test_load_invalid_yaml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "widget_count: [not, a, number]\n").unwrap();
    assert!(ClusterConfig::load_from(&path).is_err());
}

#[test]
fn test_empty_yaml_mapping_gives_defaults() {
    let config = ClusterConfig::from_yaml("{}").unwrap();
    assert_eq!(config, ClusterConfig::default());
    assert_eq!(config.content, DEFAULT_CONTENT);
}

// ========================================================================
// Session Construction Tests
// ========================================================================

#[test]
fn test_session_rejects_anchor_outside_textblock() {
    let config = ClusterConfig {
        anchor_pos: 0,
        ..ClusterConfig::default()
    };
    assert!(Session::new(config).is_err());
}

#[test]
fn test_session_rejects_bad_markup() {
    let config = ClusterConfig {
        content: "<p>unclosed".to_string(),
        ..ClusterConfig::default()
    };
    let err = Session::new(config).unwrap_err();
    assert!(format!("{:#}", err).contains("malformed markup"));
}

#[test]
fn test_session_accepts_html_void_elements_and_doctype() {
    let config = ClusterConfig {
        content: "<!DOCTYPE html><p>An ex<br>ample</p><hr><p>document</p>".to_string(),
        ..ClusterConfig::default()
    };
    let session = Session::new(config).unwrap();
    assert_eq!(session.state.doc().content().len(), 2);
    assert_eq!(session.state.doc().text_content(), "An exampledocument");
}
