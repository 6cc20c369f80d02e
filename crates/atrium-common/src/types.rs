use serde::{Deserialize, Serialize};
use std::fmt;

/// Window geometry in logical pixels. A missing position means the
/// platform picks the placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Bounds with a size but no position.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            x: None,
            y: None,
            width,
            height,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.x.zip(self.y)
    }
}

/// Identity of one window instance. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// Static descriptor handed to content at window creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    /// Always true when content runs inside the desktop host.
    pub desktop: bool,
    #[serde(rename = "isMacOS")]
    pub is_macos: bool,
    pub platform: String,
}

impl AppInfo {
    /// Describe the platform this binary was compiled for.
    pub fn current() -> Self {
        Self {
            desktop: true,
            is_macos: cfg!(target_os = "macos"),
            platform: std::env::consts::OS.to_string(),
        }
    }
}
