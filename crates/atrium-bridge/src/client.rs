//! Typed caller for the capability bridge.

use atrium_rpc::{Endpoint, RpcError, RpcPeer};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::capability::Capability;
use crate::types::{DialogResult, OauthExchange};

/// Calls host capabilities over an RPC channel.
///
/// This is the Rust mirror of `window.apis` in content.
pub struct BridgeClient {
    peer: RpcPeer,
}

impl BridgeClient {
    pub fn new(peer: RpcPeer) -> Self {
        Self { peer }
    }

    /// Connect a client-only peer to `endpoint`.
    pub fn connect(endpoint: Endpoint) -> Self {
        Self::new(RpcPeer::connect(endpoint))
    }

    pub fn peer(&self) -> &RpcPeer {
        &self.peer
    }

    async fn invoke<T: DeserializeOwned>(
        &self,
        cap: Capability,
        params: Vec<Value>,
    ) -> Result<T, RpcError> {
        let value = self.peer.call(cap.method_name(), params).await?;
        serde_json::from_value(value).map_err(|e| RpcError::Decode(format!("{cap}: {e}")))
    }

    pub async fn list_workspaces(&self) -> Result<Vec<String>, RpcError> {
        self.invoke(Capability::WorkspaceList, vec![]).await
    }

    pub async fn delete_workspace(&self, id: &str) -> Result<(), RpcError> {
        self.invoke(Capability::WorkspaceDelete, vec![json!(id)]).await
    }

    pub async fn open_load_db_file_dialog(&self) -> Result<DialogResult, RpcError> {
        self.invoke(Capability::OpenLoadDbFileDialog, vec![]).await
    }

    pub async fn open_save_db_file_dialog(&self) -> Result<DialogResult, RpcError> {
        self.invoke(Capability::OpenSaveDbFileDialog, vec![]).await
    }

    pub async fn on_theme_change(&self, theme: &str) -> Result<(), RpcError> {
        self.invoke(Capability::OnThemeChange, vec![json!(theme)]).await
    }

    pub async fn on_sidebar_visibility_change(&self, visible: bool) -> Result<(), RpcError> {
        self.invoke(Capability::OnSidebarVisibilityChange, vec![json!(visible)])
            .await
    }

    pub async fn on_workspace_change(&self, id: &str) -> Result<(), RpcError> {
        self.invoke(Capability::OnWorkspaceChange, vec![json!(id)]).await
    }

    pub async fn open_db_folder(&self) -> Result<(), RpcError> {
        self.invoke(Capability::OpenDbFolder, vec![]).await
    }

    pub async fn get_google_oauth_code(&self) -> Result<OauthExchange, RpcError> {
        self.invoke(Capability::GetGoogleOauthCode, vec![]).await
    }

    /// Fire-and-forget; no response is sent.
    pub fn update_env(&self, name: &str, value: &str) -> Result<(), RpcError> {
        self.peer
            .notify(Capability::UpdateEnv.method_name(), vec![json!(name), json!(value)])
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCapabilities, HostError};
    use crate::surface::CapabilitySurface;
    use crate::types::RequestInit;
    use async_trait::async_trait;
    use atrium_rpc::{create_pair, ErrorCode};
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::sync::Notify;

    #[derive(Default)]
    struct FakeHost {
        workspaces: Mutex<Vec<String>>,
        env: Mutex<Vec<(String, String)>>,
        env_written: Notify,
    }

    #[async_trait]
    impl HostCapabilities for FakeHost {
        async fn list_workspaces(&self) -> Result<Vec<String>, HostError> {
            Ok(self.workspaces.lock().unwrap().clone())
        }
        async fn delete_workspace(&self, id: &str) -> Result<(), HostError> {
            self.workspaces.lock().unwrap().retain(|w| w != id);
            Ok(())
        }
        async fn open_load_db_file_dialog(&self) -> Result<DialogResult, HostError> {
            Ok(DialogResult::canceled())
        }
        async fn open_save_db_file_dialog(&self) -> Result<DialogResult, HostError> {
            Ok(DialogResult::picked("/tmp/out.affine"))
        }
        async fn theme_changed(&self, _theme: &str) -> Result<(), HostError> {
            Ok(())
        }
        async fn sidebar_visibility_changed(&self, _visible: bool) -> Result<(), HostError> {
            Ok(())
        }
        async fn workspace_changed(&self, _id: &str) -> Result<(), HostError> {
            Ok(())
        }
        async fn open_db_folder(&self) -> Result<(), HostError> {
            Err(HostError::Rejected("no file manager".into()))
        }
        async fn google_oauth_code(&self) -> Result<OauthExchange, HostError> {
            Ok(OauthExchange {
                url: "https://oauth2.googleapis.com/token".into(),
                request_init: RequestInit {
                    method: "POST".into(),
                    headers: BTreeMap::new(),
                    body: String::new(),
                },
            })
        }
        async fn update_env(&self, name: &str, value: &str) -> Result<(), HostError> {
            self.env
                .lock()
                .unwrap()
                .push((name.to_owned(), value.to_owned()));
            self.env_written.notify_one();
            Ok(())
        }
    }

    fn connect() -> (RpcPeer, BridgeClient, Arc<FakeHost>) {
        let (host_end, content_end) = create_pair();
        let host = Arc::new(FakeHost::default());
        host.workspaces.lock().unwrap().push("ws-1".into());
        let peer = RpcPeer::bind(host_end, Arc::new(CapabilitySurface::new(Arc::clone(&host))));
        (peer, BridgeClient::connect(content_end), host)
    }

    #[tokio::test]
    async fn list_then_delete_round_trip() {
        let (_peer, client, _) = connect();
        assert_eq!(client.list_workspaces().await.unwrap(), vec!["ws-1"]);
        client.delete_workspace("ws-1").await.unwrap();
        assert!(client.list_workspaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_unknown_workspace_resolves() {
        let (_peer, client, _) = connect();
        client.delete_workspace("missing").await.unwrap();
        assert_eq!(client.list_workspaces().await.unwrap(), vec!["ws-1"]);
    }

    #[tokio::test]
    async fn notifications_resolve_to_unit() {
        let (_peer, client, _) = connect();
        client.on_theme_change("dark").await.unwrap();
        client.on_sidebar_visibility_change(true).await.unwrap();
        client.on_workspace_change("ws-1").await.unwrap();
    }

    #[tokio::test]
    async fn update_env_is_one_way() {
        let (peer, client, host) = connect();
        client.update_env("FOO", "bar").unwrap();
        tokio::time::timeout(Duration::from_secs(1), host.env_written.notified())
            .await
            .unwrap();
        assert_eq!(
            *host.env.lock().unwrap(),
            vec![("FOO".to_string(), "bar".to_string())]
        );
        assert_eq!(client.peer().pending_calls(), 0);
        assert_eq!(peer.pending_calls(), 0);
    }

    #[tokio::test]
    async fn host_failure_surfaces_as_remote_error() {
        let (_peer, client, _) = connect();
        let err = client.open_db_folder().await.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::HandlerFailed));
    }

    #[tokio::test]
    async fn typed_results_decode() {
        let (_peer, client, _) = connect();
        assert!(client.open_load_db_file_dialog().await.unwrap().canceled);
        let saved = client.open_save_db_file_dialog().await.unwrap();
        assert_eq!(saved.file_path.as_deref(), Some("/tmp/out.affine"));
        let oauth = client.get_google_oauth_code().await.unwrap();
        assert_eq!(oauth.request_init.method, "POST");
    }

    #[tokio::test]
    async fn closed_channel_rejects_calls() {
        let (peer, client, _) = connect();
        peer.close();
        assert_eq!(
            client.list_workspaces().await,
            Err(RpcError::ChannelClosed)
        );
    }
}
