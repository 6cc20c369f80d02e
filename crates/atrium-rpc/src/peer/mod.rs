//! One side of an RPC session over a transport [`Endpoint`].
//!
//! A peer both issues calls ([`RpcPeer::call`], [`RpcPeer::notify`]) and
//! answers calls arriving from the other side through its [`Surface`]. Each
//! incoming call runs on its own task, so responses may go out in a
//! different order than the calls came in; the correlation id ties them
//! back together.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use atrium_common::{Sequence, Subscription};
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::{RpcError, RpcErrorPayload};
use crate::protocol::Frame;
use crate::surface::Surface;
use crate::transport::{Endpoint, Message};


type Reply = oneshot::Sender<Result<Value, RpcError>>;

struct PeerInner {
    endpoint: Endpoint,
    surface: Option<Arc<dyn Surface>>,
    pending: Mutex<HashMap<u64, Reply>>,
    ids: Sequence,
}

pub struct RpcPeer {
    inner: Arc<PeerInner>,
    _incoming: Subscription,
}

impl RpcPeer {
    /// Serve `surface` on `endpoint` and allow calls to the other side.
    ///
    /// Must be called from within a tokio runtime.
    pub fn bind(endpoint: Endpoint, surface: Arc<dyn Surface>) -> Self {
        Self::start(endpoint, Some(surface))
    }

    /// Client-only peer. Calls from the other side are answered with
    /// `unknown_method`.
    pub fn connect(endpoint: Endpoint) -> Self {
        Self::start(endpoint, None)
    }

    fn start(endpoint: Endpoint, surface: Option<Arc<dyn Surface>>) -> Self {
        let closed = endpoint.closed();
        let inner = Arc::new(PeerInner {
            endpoint,
            surface,
            pending: Mutex::new(HashMap::new()),
            ids: Sequence::new(),
        });

        let weak = Arc::downgrade(&inner);
        let incoming = inner.endpoint.subscribe(move |message| {
            if let Some(inner) = weak.upgrade() {
                PeerInner::receive(&inner, message);
            }
        });

        let weak: Weak<PeerInner> = Arc::downgrade(&inner);
        tokio::spawn(async move {
            closed.await;
            if let Some(inner) = weak.upgrade() {
                inner.reject_pending();
            }
        });

        Self {
            inner,
            _incoming: incoming,
        }
    }

    /// Call `method` on the other side and wait for its answer.
    ///
    /// Fails with [`RpcError::ChannelClosed`] if the channel closes before
    /// the answer arrives.
    pub async fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, RpcError> {
        let id = self.inner.ids.next();
        let (tx, rx) = oneshot::channel();
        self.inner.pending().insert(id, tx);

        // The close watcher may already have drained the table.
        if self.inner.endpoint.is_closed() {
            self.inner.pending().remove(&id);
            return Err(RpcError::ChannelClosed);
        }

        let frame = Frame::Call {
            id,
            method: method.to_owned(),
            params,
        };
        if let Err(e) = self.inner.send(&frame) {
            self.inner.pending().remove(&id);
            return Err(e);
        }
        debug!(id, method, "rpc call sent");

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(RpcError::ChannelClosed),
        }
    }

    /// Send a one-way notification.
    pub fn notify(&self, method: &str, params: Vec<Value>) -> Result<(), RpcError> {
        self.inner.send(&Frame::Notify {
            method: method.to_owned(),
            params,
        })
    }

    /// Close the underlying channel. Pending calls on both sides fail.
    pub fn close(&self) {
        self.inner.endpoint.close();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.endpoint.is_closed()
    }

    /// Number of calls still waiting for an answer.
    pub fn pending_calls(&self) -> usize {
        self.inner.pending().len()
    }
}

impl std::fmt::Debug for RpcPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcPeer")
            .field("endpoint", &self.inner.endpoint)
            .field("serving", &self.inner.surface.is_some())
            .finish()
    }
}

impl PeerInner {
    fn pending(&self) -> MutexGuard<'_, HashMap<u64, Reply>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, frame: &Frame) -> Result<(), RpcError> {
        let message = frame
            .to_message()
            .map_err(|e| RpcError::Encode(e.to_string()))?;
        self.endpoint.send(message)?;
        Ok(())
    }

    fn receive(this: &Arc<Self>, message: &Message) {
        let frame = match Frame::parse(message) {
            Ok(frame) => frame,
            Err(e) => {
                match unparsable_call_id(message) {
                    Some(id) => {
                        debug!(id, "rejecting undecodable rpc call: {e}");
                        let error = RpcErrorPayload::invalid_params(format!("malformed call frame: {e}"));
                        if let Err(e) = this.send(&Frame::Error { id, error }) {
                            debug!(id, "could not answer rpc call: {e}");
                        }
                    }
                    None => warn!(pair = this.endpoint.pair_id(), "dropping malformed rpc frame: {e}"),
                }
                return;
            }
        };

        match frame {
            Frame::Call { id, method, params } => {
                let inner = Arc::clone(this);
                tokio::spawn(async move { inner.answer(id, method, params).await });
            }
            Frame::Notify { method, params } => {
                let inner = Arc::clone(this);
                tokio::spawn(async move { inner.handle_notify(method, params).await });
            }
            Frame::Result { id, value } => this.resolve(id, Ok(value)),
            Frame::Error { id, error } => this.resolve(id, Err(RpcError::Remote(error))),
        }
    }

    async fn answer(&self, id: u64, method: String, params: Vec<Value>) {
        let result = match &self.surface {
            Some(surface) => surface.call(&method, params).await,
            None => Err(RpcErrorPayload::unknown_method(&method)),
        };

        let frame = match result {
            Ok(value) => Frame::Result { id, value },
            Err(error) => {
                debug!(id, method = %method, code = %error.code, "rpc call failed: {}", error.message);
                Frame::Error { id, error }
            }
        };

        if let Err(e) = self.send(&frame) {
            debug!(id, method = %method, "could not answer rpc call: {e}");
        }
    }

    async fn handle_notify(&self, method: String, params: Vec<Value>) {
        let Some(surface) = &self.surface else {
            debug!(method = %method, "ignoring notification, no surface bound");
            return;
        };
        if let Err(e) = surface.notify(&method, params).await {
            warn!(method = %method, "notification handler failed: {e}");
        }
    }

    fn resolve(&self, id: u64, result: Result<Value, RpcError>) {
        match self.pending().remove(&id) {
            Some(reply) => {
                let _ = reply.send(result);
            }
            None => debug!(id, "response for unknown call id"),
        }
    }

    fn reject_pending(&self) {
        let drained: Vec<Reply> = self.pending().drain().map(|(_, reply)| reply).collect();
        if !drained.is_empty() {
            debug!(count = drained.len(), "rejecting pending rpc calls");
        }
        for reply in drained {
            let _ = reply.send(Err(RpcError::ChannelClosed));
        }
    }
}

/// Correlation id of a `call` frame that failed to decode, so the caller
/// still gets exactly one answer.
fn unparsable_call_id(message: &Message) -> Option<u64> {
    let object = message.as_object()?;
    if object.get("type")?.as_str()? != "call" {
        return None;
    }
    object.get("id")?.as_u64()
}
