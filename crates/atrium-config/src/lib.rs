//! Atrium configuration.
//!
//! TOML file under the platform config directory, overlaid with
//! environment variables and validated. Every section has defaults so a
//! partial (or missing) file works.

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, apply_overrides_with};
pub use schema::{AtriumConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use atrium_common::ConfigError;

/// Load config from the platform default path, apply environment
/// overrides and validate.
///
/// A missing file is created from the documented template.
pub fn load_config() -> Result<AtriumConfig, ConfigError> {
    let mut config = toml_loader::load_default()?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Like [`load_config`] but from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<AtriumConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let mut config = toml_loader::load_from_path(path)?;
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &AtriumConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&AtriumConfig::default());
        for section in ["\"window\"", "\"dev\"", "\"storage\"", "\"oauth\"", "\"logging\""] {
            assert!(json.contains(section), "missing {section}");
        }
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_file() {
        let err = load_config_from(Path::new("/tmp/atrium-does-not-exist/config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window]\nmin_width = 5000\n").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }
}
