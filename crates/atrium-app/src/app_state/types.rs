//! Internal constants for the app state module.

use std::time::Duration;

/// How often to poll for events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Relative path from the binary to the packaged web content.
pub(super) const CONTENT_DIR: &str = "resources/web";

/// Host events buffered for the event loop before it starts lagging.
pub(super) const EVENT_BUS_CAPACITY: usize = 256;
