use std::fs;
use std::path::Path;

use atrium_common::PlatformError;

use super::resolve::{config_dir, data_dir};

/// Creates the Atrium config and data directories plus `workspaces` if they
/// do not already exist.
pub fn ensure_dirs(workspaces: &Path) -> Result<(), PlatformError> {
    for dir in [config_dir()?, data_dir()?, workspaces.to_path_buf()] {
        fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
