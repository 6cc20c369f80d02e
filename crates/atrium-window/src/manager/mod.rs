//! Main window lifecycle.
//!
//! `WindowManager` owns at most one live window. `show_window` either
//! brings the existing window forward or builds a new one: restored
//! geometry, hidden until first paint, a fresh channel pair whose host end
//! serves the capability surface and whose content end is handed over
//! once the page has loaded.

use std::sync::Arc;

use atrium_common::{Bounds, EventBus, HostEvent, Sequence, Subscription, WindowError, WindowId};
use atrium_config::schema::ThemeSource;
use atrium_rpc::{create_pair, Endpoint, RpcPeer, Surface};
use tracing::{debug, info, warn};

use crate::backend::{PlatformWindow, WindowBackend};
use crate::events::WindowSignal;
use crate::ipc::HANDSHAKE_CHANNEL;
use crate::state::{WindowState, WindowStateStore};

mod handle;
mod types;

#[cfg(test)]
mod tests;

pub use handle::WindowHandle;
pub use types::{WindowSettings, WindowSpec};

struct ManagedWindow<W> {
    handle: WindowHandle,
    window: W,
    peer: RpcPeer,
    /// Content end of the channel, held until the content has loaded.
    content_port: Option<Endpoint>,
    shown: bool,
    _persist: Subscription,
}

pub struct WindowManager<W> {
    store: WindowStateStore,
    surface: Arc<dyn Surface>,
    settings: WindowSettings,
    events: Option<EventBus>,
    ids: Sequence,
    current: Option<ManagedWindow<W>>,
}

impl<W: PlatformWindow> WindowManager<W> {
    pub fn new(store: WindowStateStore, surface: Arc<dyn Surface>, settings: WindowSettings) -> Self {
        Self {
            store,
            surface,
            settings,
            events: None,
            ids: Sequence::new(),
            current: None,
        }
    }

    /// Publish window created/destroyed events on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn settings(&self) -> &WindowSettings {
        &self.settings
    }

    /// Handle of the live window, if any.
    pub fn current(&self) -> Option<&WindowHandle> {
        self.current.as_ref().map(|m| &m.handle)
    }

    pub fn current_window_mut(&mut self) -> Option<&mut W> {
        self.current.as_mut().map(|m| &mut m.window)
    }

    /// Host side of the live window's channel.
    pub fn peer(&self) -> Option<&RpcPeer> {
        self.current.as_ref().map(|m| &m.peer)
    }

    /// Bring the main window forward, creating it if none is alive.
    ///
    /// A reused window is restored if minimized and, once it has been
    /// shown, focused. A new window stays hidden until
    /// [`WindowSignal::ReadyToShow`]. Creation failures propagate and
    /// leave no window behind.
    pub fn show_window<B>(&mut self, backend: &mut B) -> Result<WindowHandle, WindowError>
    where
        B: WindowBackend<Window = W>,
    {
        if let Some(managed) = self.current.as_mut() {
            if managed.window.is_minimized() {
                managed.window.restore();
            }
            if managed.shown {
                managed.window.show();
                managed.window.focus();
            }
            debug!(window_id = %managed.handle.id(), "reusing main window");
            return Ok(managed.handle.clone());
        }

        self.create(backend)
    }

    fn create<B>(&mut self, backend: &mut B) -> Result<WindowHandle, WindowError>
    where
        B: WindowBackend<Window = W>,
    {
        let id = WindowId(self.ids.next());
        let saved = self.store.load(&self.settings.state_key);
        let mut bounds = saved
            .map(|s| s.bounds)
            .unwrap_or(self.settings.default_bounds);
        bounds.width = bounds.width.max(self.settings.min_width);

        let maximized = saved.is_some_and(|s| s.maximized);
        let spec = self.spec(id, bounds, maximized);
        let mut window = backend.create_window(&spec)?;

        let handle = WindowHandle::new(id, bounds);
        let persist = self
            .store
            .manage(&handle, &self.settings.state_key, WindowState { bounds, maximized });

        if let Err(e) = window.load_url(&self.settings.content_url) {
            warn!(window_id = %id, "content load failed, tearing window down: {e}");
            handle.mark_destroyed();
            window.destroy();
            return Err(e);
        }

        let (host_end, content_end) = create_pair();
        let peer = RpcPeer::bind(host_end, Arc::clone(&self.surface));

        info!(
            window_id = %id,
            width = bounds.width,
            height = bounds.height,
            url = %self.settings.content_url,
            "main window created"
        );
        self.publish(HostEvent::WindowCreated(id));

        self.current = Some(ManagedWindow {
            handle: handle.clone(),
            window,
            peer,
            content_port: Some(content_end),
            shown: false,
            _persist: persist,
        });
        Ok(handle)
    }

    fn spec(&self, id: WindowId, bounds: Bounds, maximized: bool) -> WindowSpec {
        let s = &self.settings;
        WindowSpec {
            id,
            title: s.title.clone(),
            bounds,
            min_width: s.min_width,
            maximized,
            title_bar: s.title_bar,
            traffic_light: s.traffic_light,
            translucent: s.translucent,
            theme: s.theme,
            spellcheck: s.spellcheck,
            devtools: s.devtools_on_show,
            dev_origin: s.dev_origin.clone(),
            app_info: s.app_info.clone(),
        }
    }

    /// Feed a platform event for window `id`. Events for any window other
    /// than the live one are ignored.
    ///
    /// Fails only when handing the channel to content fails, in which case
    /// the window has been torn down.
    pub fn handle_signal(&mut self, id: WindowId, signal: WindowSignal) -> Result<(), WindowError> {
        let Some(managed) = self.current.as_mut().filter(|m| m.handle.id() == id) else {
            debug!(window_id = %id, ?signal, "signal for stale window ignored");
            return Ok(());
        };

        match &signal {
            WindowSignal::ReadyToShow if !managed.shown => {
                managed.window.show();
                managed.shown = true;
                managed.handle.set_visible(true);
                if self.settings.devtools_on_show {
                    managed.window.open_devtools();
                }
                debug!(window_id = %id, "window shown");
            }
            WindowSignal::ContentLoaded => {
                if let Some(port) = managed.content_port.take() {
                    if let Err(e) = managed.window.transfer_port(HANDSHAKE_CHANNEL, port) {
                        warn!(window_id = %id, "channel handoff failed: {e}");
                        self.destroy_current();
                        return Err(e);
                    }
                    debug!(window_id = %id, channel = HANDSHAKE_CHANNEL, "channel handed to content");
                }
            }
            WindowSignal::Minimized(minimized) => {
                managed.handle.set_visible(!minimized && managed.shown);
            }
            WindowSignal::CloseRequested => {
                // TODO: ask the user to save unsaved changes before destroying.
                self.destroy_current();
                return Ok(());
            }
            _ => {}
        }

        managed.handle.emit(&signal);
        Ok(())
    }

    /// Destroy the live window, if any.
    pub fn close(&mut self) {
        self.destroy_current();
    }

    /// Apply a theme name sent by content to the native window chrome.
    pub fn apply_theme(&mut self, theme: &str) {
        let Some(source) = ThemeSource::from_name(theme) else {
            debug!(theme, "unknown theme name, chrome unchanged");
            return;
        };
        if let Some(window) = self.current_window_mut() {
            window.set_theme(source);
        }
    }

    pub fn set_title(&mut self, title: &str) {
        if let Some(window) = self.current_window_mut() {
            window.set_title(title);
        }
    }

    fn destroy_current(&mut self) {
        let Some(mut managed) = self.current.take() else {
            return;
        };
        let id = managed.handle.id();

        // Stop persisting before anything else so teardown cannot touch
        // the saved geometry.
        drop(managed._persist);
        managed.handle.mark_destroyed();
        managed.peer.close();
        drop(managed.content_port.take());
        managed.window.destroy();

        info!(window_id = %id, "main window destroyed");
        self.publish(HostEvent::WindowDestroyed(id));
    }

    fn publish(&self, event: HostEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

impl<W> Drop for WindowManager<W> {
    fn drop(&mut self) {
        if let Some(managed) = self.current.take() {
            managed.peer.close();
        }
    }
}
