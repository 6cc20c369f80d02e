//! The capability surface exposed to content.
//!
//! [`Capability`] is the fixed method table. The host implements
//! [`HostCapabilities`]; [`CapabilitySurface`] adapts it to an RPC
//! [`Surface`](atrium_rpc::Surface). [`BridgeClient`] is the typed caller
//! side, used by tests and by anything that drives the surface from Rust.

pub mod capability;
pub mod client;
pub mod host;
pub mod surface;
pub mod types;

pub use capability::{Capability, UnknownCapability};
pub use client::BridgeClient;
pub use host::{HostCapabilities, HostError};
pub use surface::CapabilitySurface;
pub use types::{DialogResult, OauthExchange, RequestInit};
