//! The winit window plus its WebView, as driven by the window manager.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use atrium_common::{Bounds, Subscription, WindowError};
use atrium_config::schema::ThemeSource;
use atrium_rpc::{Endpoint, Message};
use atrium_window::{PlatformWindow, WebViewHandle, WindowSignal};
use tracing::{debug, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{Theme, Window};

/// Native window hosting the content WebView.
///
/// The WebView is declared first so it is dropped before its window.
pub struct DesktopWindow {
    webview: WebViewHandle,
    window: Window,
    /// Host-facing end of the content channel once handed over.
    port: Option<Endpoint>,
    port_sub: Option<Subscription>,
    /// Messages from the host waiting to be evaluated in content.
    outbox: Arc<Mutex<VecDeque<Message>>>,
    maximized: bool,
    minimized: bool,
}

impl DesktopWindow {
    pub(super) fn new(window: Window, webview: WebViewHandle, maximized: bool) -> Self {
        Self {
            webview,
            window,
            port: None,
            port_sub: None,
            outbox: Arc::new(Mutex::new(VecDeque::new())),
            maximized,
            minimized: false,
        }
    }

    pub(super) fn winit_id(&self) -> winit::window::WindowId {
        self.window.id()
    }

    /// Pass a message posted by content to the host.
    pub(super) fn forward_from_content(&self, message: Message) {
        let Some(port) = &self.port else {
            debug!("content message before handshake dropped");
            return;
        };
        if let Err(e) = port.send(message) {
            debug!("content message after close dropped: {e}");
        }
    }

    /// Evaluate queued host messages in content, in order.
    pub(super) fn flush_outbox(&self) {
        let pending: Vec<Message> = self
            .outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();
        for message in &pending {
            if let Err(e) = self.webview.deliver(message) {
                warn!("failed to deliver message to content: {e}");
            }
        }
    }

    /// Compare the native state with what was last reported and return
    /// the signals describing the change. Bounds are always reported
    /// unless minimized.
    pub(super) fn sync_state(&mut self) -> Vec<WindowSignal> {
        let mut signals = Vec::new();

        let maximized = self.window.is_maximized();
        if maximized != self.maximized {
            self.maximized = maximized;
            signals.push(WindowSignal::Maximized(maximized));
        }

        let minimized = self.window.is_minimized().unwrap_or(false);
        if minimized != self.minimized {
            self.minimized = minimized;
            signals.push(WindowSignal::Minimized(minimized));
        }

        if !minimized {
            if let Some(bounds) = self.logical_bounds() {
                signals.push(WindowSignal::BoundsChanged(bounds));
            }
        }
        signals
    }

    fn logical_bounds(&self) -> Option<Bounds> {
        let scale = self.window.scale_factor();
        let size: LogicalSize<f64> = self.window.inner_size().to_logical(scale);
        if size.width < 1.0 || size.height < 1.0 {
            return None;
        }
        let bounds = Bounds::sized(size.width.round() as u32, size.height.round() as u32);
        Some(match self.window.outer_position() {
            Ok(position) => {
                let position: LogicalPosition<f64> = position.to_logical(scale);
                bounds.with_position(position.x.round() as i32, position.y.round() as i32)
            }
            Err(_) => bounds,
        })
    }
}

impl PlatformWindow for DesktopWindow {
    fn show(&mut self) {
        self.window.set_visible(true);
    }

    fn focus(&mut self) {
        self.window.focus_window();
        if let Err(e) = self.webview.focus() {
            debug!("webview focus failed: {e}");
        }
    }

    fn is_minimized(&self) -> bool {
        self.window.is_minimized().unwrap_or(false)
    }

    fn restore(&mut self) {
        self.window.set_minimized(false);
        self.minimized = false;
    }

    fn load_url(&mut self, url: &str) -> Result<(), WindowError> {
        self.webview.load_url(url)
    }

    fn open_devtools(&mut self) {
        self.webview.open_devtools();
    }

    fn transfer_port(&mut self, channel: &str, endpoint: Endpoint) -> Result<(), WindowError> {
        let outbox = Arc::clone(&self.outbox);
        let subscription = endpoint.subscribe(move |message| {
            outbox
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push_back(message.clone());
        });
        self.port_sub = Some(subscription);
        self.port = Some(endpoint);
        self.webview.announce_port(channel)
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
        self.webview.set_title(title.to_owned());
    }

    fn set_theme(&mut self, theme: ThemeSource) {
        self.window.set_theme(winit_theme(theme));
    }

    fn destroy(&mut self) {
        self.port_sub = None;
        if let Some(port) = self.port.take() {
            port.close();
            if let Err(e) = self.webview.announce_closed() {
                debug!("could not tell content the channel closed: {e}");
            }
        }
        self.outbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.window.set_visible(false);
    }
}

/// `None` follows the system theme.
pub(super) fn winit_theme(theme: ThemeSource) -> Option<Theme> {
    match theme {
        ThemeSource::System => None,
        ThemeSource::Light => Some(Theme::Light),
        ThemeSource::Dark => Some(Theme::Dark),
    }
}
