//! Graceful shutdown: close the window and its channel, stop the runtime.

use std::time::Duration;

use super::core::AtriumApp;

// =============================================================================
// SHUTDOWN
// =============================================================================

impl AtriumApp {
    /// Perform graceful shutdown of all subsystems.
    ///
    /// Order matters:
    /// 1. Destroy the main window (rejects calls still in flight)
    /// 2. Shut down the tokio runtime (cancels handler and delivery tasks)
    pub(super) fn shutdown(&mut self) {
        if self.runtime.is_none() {
            return;
        }
        tracing::info!("Initiating graceful shutdown");

        self.manager.close();
        self.webview_events.drain();

        if let Some(rt) = self.runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        tracing::info!("Graceful shutdown complete");
    }
}

// =============================================================================
// TESTS
// =============================================================================
