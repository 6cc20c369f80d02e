//! Window creation and WebView setup.

use std::path::PathBuf;
use std::sync::Arc;

use atrium_common::WindowError;
use atrium_config::AtriumConfig;
use atrium_window::{build_webview, ContentProvider, WebViewConfig, WebViewEvents, WindowBackend, WindowSpec};
use tracing::{info, warn};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowAttributes;

use super::desktop_window::{winit_theme, DesktopWindow};
use super::types::CONTENT_DIR;

/// Creates windows on the running event loop.
pub(super) struct WinitBackend<'a> {
    event_loop: &'a ActiveEventLoop,
    events: WebViewEvents,
    content: Option<Arc<ContentProvider>>,
}

impl<'a> WinitBackend<'a> {
    pub(super) fn new(
        event_loop: &'a ActiveEventLoop,
        events: WebViewEvents,
        content: Option<Arc<ContentProvider>>,
    ) -> Self {
        Self {
            event_loop,
            events,
            content,
        }
    }
}

impl WindowBackend for WinitBackend<'_> {
    type Window = DesktopWindow;

    fn create_window(&mut self, spec: &WindowSpec) -> Result<DesktopWindow, WindowError> {
        let window = self
            .event_loop
            .create_window(window_attributes(spec))
            .map_err(|e| WindowError::Create(e.to_string()))?;

        let config = WebViewConfig::for_window(spec);
        let webview = build_webview(&window, &config, self.events.clone(), self.content.clone())?;

        info!(window_id = %spec.id, "native window and webview created");
        Ok(DesktopWindow::new(window, webview, spec.maximized))
    }
}

/// Attributes for a hidden main window described by `spec`.
pub(super) fn window_attributes(spec: &WindowSpec) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(spec.title.clone())
        .with_visible(false)
        .with_transparent(spec.translucent)
        .with_inner_size(LogicalSize::new(
            f64::from(spec.bounds.width),
            f64::from(spec.bounds.height),
        ))
        .with_min_inner_size(LogicalSize::new(f64::from(spec.min_width), 0.0))
        .with_maximized(spec.maximized)
        .with_theme(winit_theme(spec.theme));

    if let Some((x, y)) = spec.bounds.position() {
        attrs = attrs.with_position(LogicalPosition::new(f64::from(x), f64::from(y)));
    }

    // macOS: transparent titlebar with content extending behind traffic lights
    #[cfg(target_os = "macos")]
    let attrs = {
        use atrium_config::schema::TitleBarStyle;
        use winit::platform::macos::WindowAttributesExtMacOS;
        if spec.title_bar == TitleBarStyle::HiddenInset {
            // winit has no traffic-light offset; the system default applies.
            tracing::debug!(traffic_light = ?spec.traffic_light, "traffic light position left to the system");
            attrs
                .with_titlebar_transparent(true)
                .with_title_hidden(true)
                .with_fullsize_content_view(true)
        } else {
            attrs
        }
    };
    attrs
}

/// Packaged content served on `atrium://`, from the configured directory
/// or the one shipped next to the binary.
pub(super) fn content_provider(config: &AtriumConfig) -> Option<Arc<ContentProvider>> {
    let dir = config
        .window
        .content_dir
        .clone()
        .or_else(default_content_dir)?;

    if !dir.is_dir() {
        warn!(
            path = %dir.display(),
            "content directory not found, packaged pages will not load"
        );
    }
    info!(content_dir = %dir.display(), "serving packaged content");
    Some(Arc::new(ContentProvider::new(dir)))
}

fn default_content_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(CONTENT_DIR))
}
