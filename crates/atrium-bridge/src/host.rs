use async_trait::async_trait;
use atrium_common::{AtriumError, PlatformError};

use crate::types::{DialogResult, OauthExchange};

/// Failure of a host capability. Reported to content as `handler_failed`.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Atrium(#[from] AtriumError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Host-side implementation of every [`Capability`](crate::Capability).
#[async_trait]
pub trait HostCapabilities: Send + Sync + 'static {
    /// Ids of the workspaces known to the host.
    async fn list_workspaces(&self) -> Result<Vec<String>, HostError>;

    /// Delete a workspace. Deleting an unknown id succeeds.
    async fn delete_workspace(&self, id: &str) -> Result<(), HostError>;

    async fn open_load_db_file_dialog(&self) -> Result<DialogResult, HostError>;

    async fn open_save_db_file_dialog(&self) -> Result<DialogResult, HostError>;

    async fn theme_changed(&self, theme: &str) -> Result<(), HostError>;

    async fn sidebar_visibility_changed(&self, visible: bool) -> Result<(), HostError>;

    async fn workspace_changed(&self, id: &str) -> Result<(), HostError>;

    /// Reveal the workspaces folder in the OS file manager.
    async fn open_db_folder(&self) -> Result<(), HostError>;

    /// Run the browser consent flow and describe the token exchange.
    async fn google_oauth_code(&self) -> Result<OauthExchange, HostError>;

    /// Persist an environment override for future launches.
    async fn update_env(&self, name: &str, value: &str) -> Result<(), HostError>;
}
