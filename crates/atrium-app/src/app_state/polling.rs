//! Polling of WebView callbacks, the content channel and host events.

use std::time::Instant;

use atrium_common::HostEvent;
use atrium_window::{PageLoadState, WebViewEvent, WindowSignal};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::{debug, info, warn};
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::AtriumApp;
use super::types::POLL_INTERVAL;

impl AtriumApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_webview_events();
            self.flush_content_outbox();
            self.poll_host_events();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    /// Feed `signal` to the live window, if any.
    pub(super) fn signal(&mut self, signal: WindowSignal) {
        let Some(id) = self.manager.current().map(|handle| handle.id()) else {
            return;
        };
        if let Err(e) = self.manager.handle_signal(id, signal) {
            warn!(window_id = %id, "window torn down: {e}");
        }
    }

    pub(super) fn poll_webview_events(&mut self) {
        for event in self.webview_events.drain() {
            match event {
                WebViewEvent::PageLoad {
                    state: PageLoadState::Finished,
                    url,
                } if is_content_url(&url) => {
                    debug!(url = %url, "content loaded");
                    self.signal(WindowSignal::ReadyToShow);
                    self.signal(WindowSignal::ContentLoaded);
                }
                WebViewEvent::PageLoad { state, url } => {
                    debug!(?state, url = %url, "page load");
                }
                WebViewEvent::IpcMessage { message } => {
                    if let Some(window) = self.manager.current_window_mut() {
                        window.forward_from_content(message);
                    }
                }
                WebViewEvent::TitleChanged { title } if !title.is_empty() => {
                    self.manager.set_title(&title);
                }
                WebViewEvent::TitleChanged { .. } => {}
                WebViewEvent::NavigationBlocked { url } => open_externally(&url),
            }
        }
    }

    fn flush_content_outbox(&mut self) {
        if let Some(window) = self.manager.current_window_mut() {
            window.flush_outbox();
        }
    }

    pub(super) fn poll_host_events(&mut self) {
        loop {
            match self.host_events.try_recv() {
                Ok(event) => self.apply_host_event(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "host events dropped, event loop fell behind");
                }
            }
        }
    }

    fn apply_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::ThemeChanged(theme) => {
                debug!(theme = %theme, "applying theme to window chrome");
                self.manager.apply_theme(&theme);
            }
            HostEvent::WorkspaceChanged(id) => {
                let title = workspace_title(&self.config.window.title, &id);
                self.manager.set_title(&title);
            }
            HostEvent::SidebarVisibilityChanged(visible) => {
                debug!(visible, "sidebar visibility changed");
            }
            HostEvent::EnvUpdated { name, .. } => {
                info!(name = %name, "env override takes effect on next launch");
            }
            HostEvent::WindowCreated(id) | HostEvent::WindowDestroyed(id) => {
                debug!(window_id = %id, "window lifecycle event");
            }
            HostEvent::Unknown => {}
        }
    }
}

/// Whether `url` is a real page rather than the WebView's initial blank.
fn is_content_url(url: &str) -> bool {
    !url.is_empty() && url != "about:blank"
}

fn workspace_title(base: &str, workspace: &str) -> String {
    if workspace.is_empty() {
        base.to_owned()
    } else {
        format!("{base} - {workspace}")
    }
}

/// Links leaving the content origin open in the system browser.
fn open_externally(url: &str) {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        debug!(url = %url, "blocked navigation");
        return;
    }
    match atrium_platform::open_url(url) {
        Ok(()) => info!("blocked navigation opened in browser"),
        Err(e) => warn!("failed to open blocked navigation externally: {e}"),
    }
}
