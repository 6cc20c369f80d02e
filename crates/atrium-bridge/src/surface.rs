//! Adapts a [`HostCapabilities`] implementation to an RPC surface.

use std::sync::Arc;

use async_trait::async_trait;
use atrium_rpc::{RpcErrorPayload, Surface};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::capability::Capability;
use crate::host::{HostCapabilities, HostError};

pub struct CapabilitySurface<H> {
    host: Arc<H>,
}

impl<H: HostCapabilities> CapabilitySurface<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    async fn dispatch(&self, cap: Capability, params: &[Value]) -> Result<Value, RpcErrorPayload> {
        let host = &self.host;
        match cap {
            Capability::WorkspaceList => reply(host.list_workspaces().await),
            Capability::WorkspaceDelete => {
                let id: String = arg(params, 0, "id")?;
                reply(host.delete_workspace(&id).await)
            }
            Capability::OpenLoadDbFileDialog => reply(host.open_load_db_file_dialog().await),
            Capability::OpenSaveDbFileDialog => reply(host.open_save_db_file_dialog().await),
            Capability::OnThemeChange => {
                let theme: String = arg(params, 0, "theme")?;
                reply(host.theme_changed(&theme).await)
            }
            Capability::OnSidebarVisibilityChange => {
                let visible: bool = arg(params, 0, "visible")?;
                reply(host.sidebar_visibility_changed(visible).await)
            }
            Capability::OnWorkspaceChange => {
                let id: String = arg(params, 0, "workspaceId")?;
                reply(host.workspace_changed(&id).await)
            }
            Capability::OpenDbFolder => reply(host.open_db_folder().await),
            Capability::GetGoogleOauthCode => reply(host.google_oauth_code().await),
            Capability::UpdateEnv => {
                let name: String = arg(params, 0, "env")?;
                let value: String = arg(params, 1, "value")?;
                reply(host.update_env(&name, &value).await)
            }
        }
    }
}

#[async_trait]
impl<H: HostCapabilities> Surface for CapabilitySurface<H> {
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcErrorPayload> {
        let cap = match Capability::from_method(method) {
            Ok(cap) => cap,
            Err(e) => {
                warn!(method, "bridge call rejected: {e}");
                return Err(RpcErrorPayload::unknown_method(method));
            }
        };
        debug!(method, "bridge call");
        self.dispatch(cap, &params).await
    }
}

/// Decode positional argument `index`. Missing arguments decode from `null`.
fn arg<T: DeserializeOwned>(params: &[Value], index: usize, name: &str) -> Result<T, RpcErrorPayload> {
    let raw = params.get(index).cloned().unwrap_or(Value::Null);
    serde_json::from_value(raw)
        .map_err(|e| RpcErrorPayload::invalid_params(format!("argument {index} ({name}): {e}")))
}

fn reply<T: Serialize>(result: Result<T, HostError>) -> Result<Value, RpcErrorPayload> {
    let value = result.map_err(|e| RpcErrorPayload::handler_failed(e.to_string()))?;
    serde_json::to_value(value).map_err(|e| RpcErrorPayload::handler_failed(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
