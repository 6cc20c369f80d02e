//! Development-mode settings.

use serde::{Deserialize, Serialize};

/// Development switches. Content is only loaded from `server_url` when
/// `enabled` is true *and* a URL is set; otherwise the packaged bundle is
/// used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DevConfig {
    pub enabled: bool,
    pub server_url: Option<String>,
    /// Open devtools once the window is first shown.
    pub open_devtools: bool,
}

impl Default for DevConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            server_url: None,
            open_devtools: true,
        }
    }
}

impl DevConfig {
    /// The dev-server URL to load, if development mode applies.
    pub fn active_server_url(&self) -> Option<&str> {
        if self.enabled {
            self.server_url.as_deref()
        } else {
            None
        }
    }

    pub fn devtools_on_show(&self) -> bool {
        self.enabled && self.open_devtools
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_url_requires_dev_mode() {
        let config = DevConfig {
            enabled: false,
            server_url: Some("http://localhost:8080".into()),
            open_devtools: true,
        };
        assert_eq!(config.active_server_url(), None);
        assert!(!config.devtools_on_show());
    }

    #[test]
    fn dev_mode_requires_server_url() {
        let config = DevConfig {
            enabled: true,
            server_url: None,
            open_devtools: true,
        };
        assert_eq!(config.active_server_url(), None);
        assert!(config.devtools_on_show());
    }

    #[test]
    fn dev_mode_with_server_url() {
        let config = DevConfig {
            enabled: true,
            server_url: Some("http://localhost:8080".into()),
            open_devtools: false,
        };
        assert_eq!(config.active_server_url(), Some("http://localhost:8080"));
        assert!(!config.devtools_on_show());
    }
}
