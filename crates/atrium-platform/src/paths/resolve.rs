use std::path::PathBuf;

use atrium_common::PlatformError;

pub(super) const APP_NAME: &str = "atrium";

/// Returns the platform-specific configuration directory for Atrium.
///
/// - macOS: `~/Library/Application Support/atrium`
/// - Linux: `$XDG_CONFIG_HOME/atrium` (defaults to `~/.config/atrium`)
/// - Windows: `%APPDATA%\atrium`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for Atrium.
///
/// - macOS: `~/Library/Application Support/atrium`
/// - Linux: `$XDG_DATA_HOME/atrium` (defaults to `~/.local/share/atrium`)
/// - Windows: `%APPDATA%\atrium`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Returns the path to the main configuration file.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Returns the path to the env override file written by `updateEnv`.
pub fn env_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join(".env"))
}

/// Returns the default workspaces directory, `data_dir()/workspaces`.
pub fn workspaces_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("workspaces"))
}

/// Returns the path of the persisted window state file.
pub fn window_state_file(file_name: &str) -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join(file_name))
}
