//! Duplex in-process message channel.
//!
//! [`create_pair`] returns two connected [`Endpoint`]s. A message sent on
//! one is delivered to the other's listeners, in send order. Messages sent
//! before the receiving side has a listener are queued and delivered once
//! the first listener subscribes.
//!
//! Closing either endpoint (or dropping it) closes the pair: sends fail
//! with [`TransportError::Closed`] and no further messages are delivered.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use atrium_common::{Listeners, Sequence, Subscription};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;

/// Opaque transport payload.
pub type Message = serde_json::Value;

static PAIR_IDS: Sequence = Sequence::new();

/// One side of a duplex channel.
pub struct Endpoint {
    pair: u64,
    side: &'static str,
    outbound: mpsc::UnboundedSender<Message>,
    inbound: Mutex<Option<mpsc::UnboundedReceiver<Message>>>,
    listeners: Listeners<Message>,
    closed: CancellationToken,
}

/// Create a connected endpoint pair.
pub fn create_pair() -> (Endpoint, Endpoint) {
    let pair = PAIR_IDS.next();
    let (a_tx, b_rx) = mpsc::unbounded_channel();
    let (b_tx, a_rx) = mpsc::unbounded_channel();
    let closed = CancellationToken::new();

    let a = Endpoint::new(pair, "a", a_tx, a_rx, closed.clone());
    let b = Endpoint::new(pair, "b", b_tx, b_rx, closed);
    tracing::debug!(pair, "channel pair created");
    (a, b)
}

impl Endpoint {
    fn new(
        pair: u64,
        side: &'static str,
        outbound: mpsc::UnboundedSender<Message>,
        inbound: mpsc::UnboundedReceiver<Message>,
        closed: CancellationToken,
    ) -> Self {
        Self {
            pair,
            side,
            outbound,
            inbound: Mutex::new(Some(inbound)),
            listeners: Listeners::new(),
            closed,
        }
    }

    /// Identifier shared by both endpoints of a pair.
    pub fn pair_id(&self) -> u64 {
        self.pair
    }

    /// Queue `message` for the other side. Never blocks.
    pub fn send(&self, message: Message) -> Result<(), TransportError> {
        if self.closed.is_cancelled() {
            return Err(TransportError::Closed);
        }
        self.outbound.send(message).map_err(|_| {
            self.closed.cancel();
            TransportError::Closed
        })
    }

    /// Register a listener for incoming messages.
    ///
    /// The first subscription starts delivery, so it must be made from
    /// within a tokio runtime.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Message) + Send + Sync + 'static,
    {
        let subscription = self.listeners.subscribe(listener);
        self.start();
        subscription
    }

    fn start(&self) {
        let inbound = self
            .inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(mut inbound) = inbound else {
            return;
        };

        let listeners = self.listeners.clone();
        let closed = self.closed.clone();
        let (pair, side) = (self.pair, self.side);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = closed.cancelled() => break,
                    message = inbound.recv() => match message {
                        Some(message) => {
                            listeners.emit(&message);
                        }
                        None => {
                            closed.cancel();
                            break;
                        }
                    },
                }
            }
            listeners.clear();
            tracing::trace!(pair, side, "endpoint delivery stopped");
        });
    }

    /// Close both endpoints of the pair. Idempotent.
    pub fn close(&self) {
        if !self.closed.is_cancelled() {
            tracing::debug!(pair = self.pair, side = self.side, "channel pair closed");
            self.closed.cancel();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Resolves once the pair is closed. Does not borrow the endpoint.
    pub fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.closed.clone();
        async move { token.cancelled().await }
    }
}

impl Drop for Endpoint {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("pair", &self.pair)
            .field("side", &self.side)
            .field("closed", &self.is_closed())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
