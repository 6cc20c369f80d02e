//! Workspaces on disk: one sub-directory of the workspaces root per id.

use std::io;
use std::path::{Path, PathBuf};

use atrium_bridge::HostError;
use tracing::{debug, info};

pub struct WorkspaceStore {
    root: PathBuf,
}

impl WorkspaceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ids of all workspaces, sorted. A missing root means no workspaces.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if !name.starts_with('.') => ids.push(name),
                Ok(_) => {}
                Err(name) => debug!(?name, "skipping non-UTF-8 workspace directory"),
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Delete workspace `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, HostError> {
        validate_workspace_id(id)?;
        let path = self.root.join(id);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => {
                info!(workspace = id, "workspace deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(workspace = id, "workspace to delete does not exist");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// A workspace id names exactly one directory below the root.
pub fn validate_workspace_id(id: &str) -> Result<(), HostError> {
    let invalid = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0'])
        || id.contains("..");
    if invalid {
        return Err(HostError::Rejected(format!("invalid workspace id: {id:?}")));
    }
    Ok(())
}
