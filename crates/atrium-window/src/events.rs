//! Window and WebView event types.

use std::sync::{Arc, Mutex, PoisonError};

use atrium_common::Bounds;
use serde::{Deserialize, Serialize};

/// Platform events for one window, as fed to the
/// [`WindowManager`](crate::WindowManager).
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSignal {
    /// Outer position or inner size changed. Logical pixels.
    BoundsChanged(Bounds),
    Maximized(bool),
    Minimized(bool),
    /// First paint is done; the window may be shown without a blank flash.
    ReadyToShow,
    /// The initial content target finished loading.
    ContentLoaded,
    CloseRequested,
}

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events emitted by the WebView from its own callbacks.
#[derive(Debug, Clone, PartialEq)]
pub enum WebViewEvent {
    PageLoad { state: PageLoadState, url: String },
    TitleChanged { title: String },
    /// A transport message posted by content.
    IpcMessage { message: serde_json::Value },
    NavigationBlocked { url: String },
}

/// Queue the WebView callbacks push into and the event loop drains.
#[derive(Clone, Default)]
pub struct WebViewEvents {
    queue: Arc<Mutex<Vec<WebViewEvent>>>,
}

impl WebViewEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: WebViewEvent) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Drain all pending events.
    pub fn drain(&self) -> Vec<WebViewEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
