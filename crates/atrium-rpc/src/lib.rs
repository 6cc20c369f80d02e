//! Host/content messaging for Atrium.
//!
//! - [`transport`]: an in-process duplex endpoint pair carrying opaque JSON
//!   messages, FIFO per direction.
//! - [`protocol`]: the call/notify/result/error frames layered on top.
//! - [`peer`]: one side of an RPC session. Either side may call the other;
//!   incoming calls are dispatched to a [`Surface`].

pub mod error;
pub mod peer;
pub mod protocol;
pub mod surface;
pub mod transport;

pub use error::{ErrorCode, RpcError, RpcErrorPayload, TransportError};
pub use peer::RpcPeer;
pub use protocol::Frame;
pub use surface::Surface;
pub use transport::{create_pair, Endpoint, Message};
