//! Main window configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Title bar presentation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TitleBarStyle {
    /// Platform default chrome.
    Default,
    /// Hidden title bar with inset traffic lights (macOS).
    HiddenInset,
    /// Pick per platform: `hidden_inset` on macOS, `default` elsewhere.
    #[default]
    Auto,
}

impl TitleBarStyle {
    /// Resolve `Auto` against the compile target.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(target_os = "macos") => Self::HiddenInset,
            Self::Auto => Self::Default,
            other => other,
        }
    }
}

/// Native theme forced on window chrome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    System,
    #[default]
    Light,
    Dark,
}

impl ThemeSource {
    /// Parse a theme name sent by content. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Position of the macOS traffic-light buttons inside a hidden-inset
/// title bar, in logical pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TrafficLightPosition {
    pub x: i32,
    pub y: i32,
}

impl Default for TrafficLightPosition {
    fn default() -> Self {
        Self { x: 24, y: 18 }
    }
}

/// Window appearance and sizing.
///
/// `default_width`/`default_height` only apply when no saved window
/// state exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub default_width: u32,
    pub default_height: u32,
    pub min_width: u32,
    pub title_bar: TitleBarStyle,
    pub traffic_light: TrafficLightPosition,
    /// Translucent window with under-window vibrancy. Only honoured on macOS.
    pub vibrancy: bool,
    pub theme_source: ThemeSource,
    pub spellcheck: bool,
    /// Packaged web bundle served over `atrium://`. Unset means
    /// `resources/web` next to the executable.
    pub content_dir: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Atrium".into(),
            default_width: 1000,
            default_height: 800,
            min_width: 640,
            title_bar: TitleBarStyle::Auto,
            traffic_light: TrafficLightPosition::default(),
            vibrancy: true,
            theme_source: ThemeSource::Light,
            spellcheck: false,
            content_dir: None,
        }
    }
}

impl WindowConfig {
    /// Whether the window should be created translucent on this platform.
    pub fn translucent(&self) -> bool {
        self.vibrancy && cfg!(target_os = "macos")
    }
}

// =============================================================================
// Tests
// =============================================================================
