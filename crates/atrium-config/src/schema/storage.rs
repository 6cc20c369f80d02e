//! Where host-side state lives on disk.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage locations. Unset paths resolve to the platform data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub workspaces_dir: Option<PathBuf>,
    /// File name of the persisted window geometry, inside the data directory.
    pub window_state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            workspaces_dir: None,
            window_state_file: "window-state.json".into(),
        }
    }
}
