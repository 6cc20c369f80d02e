use std::sync::Arc;

use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::content::{ContentProvider, CONTENT_HTTP_ORIGIN, CONTENT_SCHEME};
use crate::events::{PageLoadState, WebViewEvent, WebViewEvents};
use crate::ipc::parse_ipc_body;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Origins packaged content may always navigate to.
/// - `atrium://` custom protocol for packaged content
/// - `http(s)://atrium.localhost` is how WebView2 and WebKitGTK expose it
/// - `about:blank` default empty page
pub const ALLOWED_NAV_PREFIXES: &[&str] = &[
    "atrium://",
    "http://atrium.localhost",
    "https://atrium.localhost",
    "about:blank",
];

/// Decides which URLs the main WebView may navigate to.
#[derive(Debug, Clone, Default)]
pub struct NavigationPolicy {
    dev_origin: Option<String>,
}

impl NavigationPolicy {
    pub fn new(dev_origin: Option<String>) -> Self {
        Self {
            dev_origin: dev_origin.map(|o| o.trim_end_matches('/').to_owned()),
        }
    }

    pub fn allows(&self, url: &str) -> bool {
        if ALLOWED_NAV_PREFIXES
            .iter()
            .any(|prefix| has_origin_prefix(url, prefix))
        {
            return true;
        }
        self.dev_origin
            .as_deref()
            .is_some_and(|origin| has_origin_prefix(url, origin))
    }
}

/// `url` starts with `prefix` and the match ends at an origin boundary, so
/// `http://atrium.localhost.evil` does not pass for `http://atrium.localhost`.
fn has_origin_prefix(url: &str, prefix: &str) -> bool {
    let Some(rest) = url.strip_prefix(prefix) else {
        return false;
    };
    prefix.ends_with("://") || rest.is_empty() || rest.starts_with(['/', '?', '#'])
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_ipc_handler(builder: WebViewBuilder<'_>, events: WebViewEvents) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        match parse_ipc_body(body) {
            Some(message) => {
                debug!(body_len = body.len(), "IPC message from content");
                events.push(WebViewEvent::IpcMessage { message });
            }
            None => warn!(body_len = body.len(), "IPC message rejected: invalid JSON"),
        }
    })
}

pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    events: WebViewEvents,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        events.push(WebViewEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_title_handler(builder: WebViewBuilder<'_>, events: WebViewEvents) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(title = %title, "title changed");
        events.push(WebViewEvent::TitleChanged { title });
    })
}

pub(super) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    events: WebViewEvents,
    policy: NavigationPolicy,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if policy.allows(&url) {
            debug!(url = %url, "navigation allowed");
            return true;
        }
        warn!(url = %url, "navigation blocked: URL not in allowlist");
        events.push(WebViewEvent::NavigationBlocked { url });
        false
    })
}

pub(super) fn attach_custom_protocol(
    builder: WebViewBuilder<'_>,
    provider: Arc<ContentProvider>,
) -> WebViewBuilder<'_> {
    builder.with_custom_protocol(CONTENT_SCHEME.to_owned(), move |_wv_id, request| {
        let uri = request.uri().to_string();
        let response = match provider.resolve_uri(&uri) {
            Some((mime, data)) => wry::http::Response::builder()
                .status(200)
                .header("Content-Type", mime.as_ref())
                .header("Access-Control-Allow-Origin", CONTENT_HTTP_ORIGIN)
                .body(std::borrow::Cow::from(data.into_owned())),
            None => {
                warn!(uri = %uri, "custom protocol: asset not found");
                wry::http::Response::builder()
                    .status(404)
                    .body(std::borrow::Cow::from(b"Not Found".to_vec()))
            }
        };
        response.unwrap_or_else(|e| {
            warn!(uri = %uri, "custom protocol: bad response: {e}");
            wry::http::Response::new(std::borrow::Cow::from(Vec::new()))
        })
    })
}

// =============================================================================
// TESTS
// =============================================================================
