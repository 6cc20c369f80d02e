//! Desktop implementation of the capabilities exposed to content.

pub mod env_store;
pub mod oauth;
pub mod workspaces;

use std::path::PathBuf;

use async_trait::async_trait;
use atrium_bridge::{DialogResult, HostCapabilities, HostError, OauthExchange};
use atrium_common::{EventBus, HostEvent};
use atrium_config::schema::OauthConfig;
use atrium_config::AtriumConfig;
use tracing::{debug, info};

pub use workspaces::WorkspaceStore;

/// Suggested name for a database saved through the save dialog.
const DEFAULT_EXPORT_NAME: &str = "workspace.db";

type BrowserOpener = fn(&str) -> Result<(), atrium_common::PlatformError>;

pub struct DesktopHost {
    workspaces: WorkspaceStore,
    env_file: PathBuf,
    oauth: OauthConfig,
    events: EventBus,
    open_browser: BrowserOpener,
}

impl DesktopHost {
    pub fn new(workspaces: WorkspaceStore, env_file: PathBuf, oauth: OauthConfig, events: EventBus) -> Self {
        Self {
            workspaces,
            env_file,
            oauth,
            events,
            open_browser: atrium_platform::open_url,
        }
    }

    /// Resolve storage locations from `config` and the platform defaults.
    pub fn from_config(config: &AtriumConfig, events: EventBus) -> Result<Self, HostError> {
        let root = match &config.storage.workspaces_dir {
            Some(dir) => dir.clone(),
            None => atrium_platform::workspaces_dir()?,
        };
        Ok(Self::new(
            WorkspaceStore::new(root),
            atrium_platform::env_file()?,
            config.oauth.clone(),
            events,
        ))
    }

    #[cfg(test)]
    fn with_browser(mut self, open_browser: BrowserOpener) -> Self {
        self.open_browser = open_browser;
        self
    }

    fn publish(&self, event: HostEvent) {
        let receivers = self.events.publish(event);
        debug!(receivers, "host event published");
    }
}

#[async_trait]
impl HostCapabilities for DesktopHost {
    async fn list_workspaces(&self) -> Result<Vec<String>, HostError> {
        Ok(self.workspaces.list().await?)
    }

    async fn delete_workspace(&self, id: &str) -> Result<(), HostError> {
        self.workspaces.delete(id).await.map(|_| ())
    }

    async fn open_load_db_file_dialog(&self) -> Result<DialogResult, HostError> {
        let start = Some(self.workspaces.root().to_path_buf());
        let picked = atrium_platform::pick_db_file(start).await?;
        Ok(dialog_result(picked))
    }

    async fn open_save_db_file_dialog(&self) -> Result<DialogResult, HostError> {
        let picked = atrium_platform::save_db_file(None, DEFAULT_EXPORT_NAME).await?;
        Ok(dialog_result(picked))
    }

    async fn theme_changed(&self, theme: &str) -> Result<(), HostError> {
        self.publish(HostEvent::ThemeChanged(theme.to_owned()));
        Ok(())
    }

    async fn sidebar_visibility_changed(&self, visible: bool) -> Result<(), HostError> {
        self.publish(HostEvent::SidebarVisibilityChanged(visible));
        Ok(())
    }

    async fn workspace_changed(&self, id: &str) -> Result<(), HostError> {
        self.publish(HostEvent::WorkspaceChanged(id.to_owned()));
        Ok(())
    }

    async fn open_db_folder(&self) -> Result<(), HostError> {
        let root = self.workspaces.root();
        tokio::fs::create_dir_all(root).await?;
        atrium_platform::open_folder(root)?;
        Ok(())
    }

    async fn google_oauth_code(&self) -> Result<OauthExchange, HostError> {
        oauth::run_consent_flow(&self.oauth, self.open_browser).await
    }

    async fn update_env(&self, name: &str, value: &str) -> Result<(), HostError> {
        env_store::upsert(&self.env_file, name, value)?;
        info!(name, path = %self.env_file.display(), "env override saved");
        self.publish(HostEvent::EnvUpdated {
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }
}

fn dialog_result(picked: Option<PathBuf>) -> DialogResult {
    match picked {
        Some(path) => DialogResult::picked(path.display().to_string()),
        None => DialogResult::canceled(),
    }
}
