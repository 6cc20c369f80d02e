//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{AtriumConfig, LogLevel, ThemeSource};
use atrium_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_atrium_config.toml"));
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_from_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[window]
theme_source = "dark"

[dev]
enabled = true
server_url = "http://localhost:3000"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.theme_source, ThemeSource::Dark);
    assert_eq!(config.window.default_width, 1000);
    assert_eq!(config.dev.active_server_url(), Some("http://localhost:3000"));
    assert_eq!(config.logging.level, LogLevel::Info);
}

#[test]
fn load_from_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window\ntitle = ").unwrap();

    match load_from_path(&path) {
        Err(ConfigError::ParseError(msg)) => assert!(msg.contains("failed to parse TOML")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn load_from_wrong_type_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\ndefault_width = \"wide\"\n").unwrap();
    assert!(matches!(load_from_path(&path), Err(ConfigError::ParseError(_))));
}

#[test]
fn load_keeps_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[window]\ndefault_width = 0\n").unwrap();
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.window.default_width, 0);
}

#[test]
fn create_default_config_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sub").join("config.toml");
    create_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("# Atrium Configuration"));
    assert!(content.contains("[window]"));
}

#[test]
fn default_template_parses_to_defaults() {
    let config: AtriumConfig = toml::from_str(&super::template::default_config_toml()).unwrap();
    assert_eq!(config.window.min_width, 640);
    assert_eq!(config.storage.window_state_file, "window-state.json");
}

#[test]
fn default_config_path_ends_with_atrium() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("atrium/config.toml"));
    }
}
