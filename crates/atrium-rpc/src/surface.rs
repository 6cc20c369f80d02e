use async_trait::async_trait;
use serde_json::Value;

use crate::error::RpcErrorPayload;

/// Handler for calls arriving at an [`RpcPeer`](crate::RpcPeer).
#[async_trait]
pub trait Surface: Send + Sync {
    /// Answer a call. Unrecognised methods return
    /// [`RpcErrorPayload::unknown_method`].
    async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcErrorPayload>;

    /// Handle a one-way notification. Errors are logged by the peer and
    /// never reach the sender.
    async fn notify(&self, method: &str, params: Vec<Value>) -> Result<(), RpcErrorPayload> {
        self.call(method, params).await.map(|_| ())
    }
}
