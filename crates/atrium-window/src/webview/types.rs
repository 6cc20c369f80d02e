use crate::manager::WindowSpec;

/// Configuration for building the main WebView.
#[derive(Debug, Clone)]
pub struct WebViewConfig {
    /// Script run before any page script on every navigation.
    pub init_script: String,
    pub transparent: bool,
    pub devtools: bool,
    pub user_agent: Option<String>,
    /// Development server origin that navigation may also reach.
    pub dev_origin: Option<String>,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            init_script: String::new(),
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("Atrium/{}", env!("CARGO_PKG_VERSION"))),
            dev_origin: None,
        }
    }
}

impl WebViewConfig {
    /// Derive the WebView configuration for a window about to be built.
    pub fn for_window(spec: &WindowSpec) -> Self {
        Self {
            init_script: crate::ipc::bridge_init_script(&spec.app_info, spec.spellcheck),
            transparent: spec.translucent,
            devtools: spec.devtools || cfg!(debug_assertions),
            dev_origin: spec.dev_origin.clone(),
            ..Default::default()
        }
    }
}
