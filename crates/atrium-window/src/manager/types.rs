use std::path::PathBuf;

use atrium_common::{AppInfo, Bounds, WindowId};
use atrium_config::schema::{ThemeSource, TitleBarStyle, TrafficLightPosition};
use atrium_config::AtriumConfig;

use crate::content::PACKAGED_INDEX_URL;
use crate::state::MAIN_WINDOW_KEY;

/// Everything the manager needs to know to build the main window.
#[derive(Debug, Clone)]
pub struct WindowSettings {
    /// Key under which geometry is persisted.
    pub state_key: String,
    pub title: String,
    /// Size used when nothing was persisted.
    pub default_bounds: Bounds,
    pub min_width: u32,
    pub title_bar: TitleBarStyle,
    pub traffic_light: TrafficLightPosition,
    pub translucent: bool,
    pub theme: ThemeSource,
    pub spellcheck: bool,
    /// Initial content target.
    pub content_url: String,
    /// Development mode: open devtools once the window is shown.
    pub devtools_on_show: bool,
    /// Extra navigation origin allowed in development.
    pub dev_origin: Option<String>,
    pub content_dir: Option<PathBuf>,
    pub app_info: AppInfo,
}

impl WindowSettings {
    pub fn from_config(config: &AtriumConfig) -> Self {
        let dev_url = config.dev.active_server_url().map(str::to_owned);
        Self {
            state_key: MAIN_WINDOW_KEY.to_owned(),
            title: config.window.title.clone(),
            default_bounds: Bounds::sized(
                config.window.default_width,
                config.window.default_height,
            ),
            min_width: config.window.min_width,
            title_bar: config.window.title_bar.resolve(),
            traffic_light: config.window.traffic_light,
            translucent: config.window.translucent(),
            theme: config.window.theme_source,
            spellcheck: config.window.spellcheck,
            content_url: dev_url
                .clone()
                .unwrap_or_else(|| PACKAGED_INDEX_URL.to_owned()),
            devtools_on_show: config.dev.devtools_on_show(),
            dev_origin: dev_url,
            content_dir: config.window.content_dir.clone(),
            app_info: AppInfo::current(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::from_config(&AtriumConfig::default())
    }
}

/// Creation parameters handed to a [`WindowBackend`](crate::WindowBackend).
///
/// Windows are always created hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    pub bounds: Bounds,
    pub min_width: u32,
    pub maximized: bool,
    pub title_bar: TitleBarStyle,
    pub traffic_light: TrafficLightPosition,
    pub translucent: bool,
    pub theme: ThemeSource,
    pub spellcheck: bool,
    pub devtools: bool,
    pub dev_origin: Option<String>,
    pub app_info: AppInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_settings_load_packaged_index() {
        let settings = WindowSettings::default();
        assert_eq!(settings.content_url, "atrium://localhost/index.html");
        assert_eq!(settings.default_bounds, Bounds::sized(1000, 800));
        assert_eq!(settings.min_width, 640);
        assert_eq!(settings.state_key, "main");
        assert!(!settings.devtools_on_show);
        assert!(settings.dev_origin.is_none());
        assert!(!settings.spellcheck);
        assert_eq!(settings.theme, ThemeSource::Light);
    }

    #[test]
    fn dev_settings_need_flag_and_url() {
        let mut config = AtriumConfig::default();
        config.dev.server_url = Some("http://localhost:8080".into());
        assert_eq!(
            WindowSettings::from_config(&config).content_url,
            "atrium://localhost/index.html"
        );

        config.dev.enabled = true;
        let settings = WindowSettings::from_config(&config);
        assert_eq!(settings.content_url, "http://localhost:8080");
        assert_eq!(settings.dev_origin.as_deref(), Some("http://localhost:8080"));
        assert!(settings.devtools_on_show);
    }

    #[test]
    fn dev_flag_without_url_stays_packaged() {
        let mut config = AtriumConfig::default();
        config.dev.enabled = true;
        let settings = WindowSettings::from_config(&config);
        assert_eq!(settings.content_url, "atrium://localhost/index.html");
        assert!(settings.devtools_on_show);
    }

    #[test]
    fn title_bar_is_resolved() {
        let settings = WindowSettings::default();
        assert_ne!(settings.title_bar, TitleBarStyle::Auto);
    }
}
