//! Main window for Atrium.
//!
//! - [`WindowManager`]: singleton lifecycle of the main window, its
//!   persisted geometry and its host/content channel
//! - [`WindowStateStore`]: window bounds persisted across launches
//! - [`webview`]: the wry WebView rendering content, with its navigation
//!   allowlist and the `atrium://` protocol
//! - [`ipc`]: the script exposing `window.apis` and `window.appInfo`

pub mod backend;
pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;
pub mod state;
pub mod webview;

pub use backend::{PlatformWindow, WindowBackend};
pub use content::{ContentProvider, PACKAGED_INDEX_URL};
pub use events::{PageLoadState, WebViewEvent, WebViewEvents, WindowSignal};
pub use ipc::HANDSHAKE_CHANNEL;
pub use manager::{WindowHandle, WindowManager, WindowSettings, WindowSpec};
pub use state::{WindowState, WindowStateStore, MAIN_WINDOW_KEY};
pub use webview::{build_webview, NavigationPolicy, WebViewConfig, WebViewHandle};
