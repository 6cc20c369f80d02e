//! AtriumApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use atrium_bridge::CapabilitySurface;
use atrium_common::{AtriumError, EventBus, HostEvent};
use atrium_config::AtriumConfig;
use atrium_window::{ContentProvider, WebViewEvents, WindowManager, WindowSettings, WindowStateStore};
use tokio::runtime::Runtime;
use tokio::sync::broadcast;

use crate::host::DesktopHost;

use super::desktop_window::DesktopWindow;
use super::init::content_provider;
use super::types::EVENT_BUS_CAPACITY;

/// Top-level application state.
pub struct AtriumApp {
    pub(super) config: AtriumConfig,
    pub(super) manager: WindowManager<DesktopWindow>,

    // Events pushed by WebView callbacks and by host capabilities
    pub(super) webview_events: WebViewEvents,
    pub(super) host_events: broadcast::Receiver<HostEvent>,

    pub(super) content: Option<Arc<ContentProvider>>,

    // Serves content's calls; shut down last
    pub(super) runtime: Option<Runtime>,

    // Whether the app should exit
    pub(super) should_exit: bool,
    pub(super) last_poll: Instant,
}

impl AtriumApp {
    /// Build the app with platform storage locations.
    pub fn new(config: AtriumConfig, runtime: Runtime) -> Result<Self, AtriumError> {
        let events = EventBus::new(EVENT_BUS_CAPACITY);
        let store = WindowStateStore::new(atrium_platform::window_state_file(
            &config.storage.window_state_file,
        )?);
        let host = DesktopHost::from_config(&config, events.clone())
            .map_err(|e| AtriumError::Other(format!("capability host: {e}")))?;
        Ok(Self::from_parts(config, runtime, store, host, events))
    }

    pub(super) fn from_parts(
        config: AtriumConfig,
        runtime: Runtime,
        store: WindowStateStore,
        host: DesktopHost,
        events: EventBus,
    ) -> Self {
        let surface = Arc::new(CapabilitySurface::new(Arc::new(host)));
        let manager = WindowManager::new(store, surface, WindowSettings::from_config(&config))
            .with_events(events.clone());
        let content = content_provider(&config);

        Self {
            config,
            manager,
            webview_events: WebViewEvents::new(),
            host_events: events.subscribe(),
            content,
            runtime: Some(runtime),
            should_exit: false,
            last_poll: Instant::now(),
        }
    }
}
