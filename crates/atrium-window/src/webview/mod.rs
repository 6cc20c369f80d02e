//! The wry WebView that renders the main window's content.
//!
//! WebView callbacks run on the UI thread and only push into a
//! [`WebViewEvents`](crate::WebViewEvents) queue; the event loop drains it
//! and forwards IPC messages into the transport.

mod handle;
mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use handlers::NavigationPolicy;
pub use lifecycle::build_webview;
pub use types::WebViewConfig;
