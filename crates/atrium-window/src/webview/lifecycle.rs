use std::sync::Arc;

use atrium_common::WindowError;
use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::content::ContentProvider;
use crate::events::WebViewEvents;

use super::handle::WebViewHandle;
use super::handlers::{self, NavigationPolicy};
use super::types::WebViewConfig;

/// Build the WebView filling `window`.
///
/// The WebView starts on `about:blank`; content is loaded through
/// [`WebViewHandle::load_url`]. Packaged content is served from `content`
/// when given.
pub fn build_webview<W: raw_window_handle::HasWindowHandle>(
    window: &W,
    config: &WebViewConfig,
    events: WebViewEvents,
    content: Option<Arc<ContentProvider>>,
) -> Result<WebViewHandle, WindowError> {
    let mut builder = WebViewBuilder::new()
        .with_transparent(config.transparent)
        .with_devtools(config.devtools)
        .with_focused(true)
        .with_initialization_script(&config.init_script);

    if let Some(ua) = &config.user_agent {
        builder = builder.with_user_agent(ua);
    }

    builder = handlers::attach_ipc_handler(builder, events.clone());
    builder = handlers::attach_page_load_handler(builder, events.clone());
    builder = handlers::attach_title_handler(builder, events.clone());
    builder = handlers::attach_navigation_handler(
        builder,
        events,
        NavigationPolicy::new(config.dev_origin.clone()),
    );

    if let Some(provider) = content {
        debug!(base_dir = %provider.base_dir().display(), "serving packaged content");
        builder = handlers::attach_custom_protocol(builder, provider);
    }

    let webview = builder
        .build(window)
        .map_err(|e| WindowError::WebView(e.to_string()))?;

    debug!("WebView created");
    Ok(WebViewHandle::new(webview))
}
