//! Configuration schema types for Atrium.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod dev;
mod logging;
mod oauth;
mod storage;
mod window;

pub use dev::*;
pub use logging::*;
pub use oauth::*;
pub use storage::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Atrium.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AtriumConfig {
    pub window: WindowConfig,
    pub dev: DevConfig,
    pub storage: StorageConfig,
    pub oauth: OauthConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
