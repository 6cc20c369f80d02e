use atrium_common::WindowError;
use serde_json::Value;
use wry::WebView;

/// Handle to the main window's WebView.
pub struct WebViewHandle {
    webview: WebView,
    current_url: String,
    current_title: String,
}

impl WebViewHandle {
    pub(crate) fn new(webview: WebView) -> Self {
        Self {
            webview,
            current_url: "about:blank".to_owned(),
            current_title: String::new(),
        }
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn current_title(&self) -> &str {
        &self.current_title
    }

    /// Update the tracked title.
    pub fn set_title(&mut self, title: String) {
        self.current_title = title;
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), WindowError> {
        self.webview
            .load_url(url)
            .map_err(|e| WindowError::Load {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        self.current_url = url.to_owned();
        Ok(())
    }

    pub fn evaluate_script(&self, js: &str) -> Result<(), WindowError> {
        self.webview
            .evaluate_script(js)
            .map_err(|e| WindowError::WebView(e.to_string()))
    }

    /// Deliver one transport message to content.
    pub fn deliver(&self, message: &Value) -> Result<(), WindowError> {
        self.evaluate_script(&crate::ipc::js_deliver_message(message))
    }

    /// Announce the channel to content.
    pub fn announce_port(&self, channel: &str) -> Result<(), WindowError> {
        self.evaluate_script(&crate::ipc::js_transfer_port(channel))
    }

    /// Tell content the channel has closed so its pending calls fail.
    pub fn announce_closed(&self) -> Result<(), WindowError> {
        self.evaluate_script(crate::ipc::JS_CHANNEL_CLOSED)
    }

    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }

    pub fn focus(&self) -> Result<(), WindowError> {
        self.webview
            .focus()
            .map_err(|e| WindowError::WebView(e.to_string()))
    }
}
