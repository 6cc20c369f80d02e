//! Seam between the lifecycle manager and the windowing toolkit.

use atrium_common::WindowError;
use atrium_config::schema::ThemeSource;
use atrium_rpc::Endpoint;

use crate::manager::WindowSpec;

/// Creates platform windows.
pub trait WindowBackend {
    type Window: PlatformWindow;

    /// Build a hidden window from `spec`.
    fn create_window(&mut self, spec: &WindowSpec) -> Result<Self::Window, WindowError>;
}

/// One live top-level window with its content view.
pub trait PlatformWindow {
    fn show(&mut self);

    fn focus(&mut self);

    fn is_minimized(&self) -> bool;

    /// Un-minimize.
    fn restore(&mut self);

    fn load_url(&mut self, url: &str) -> Result<(), WindowError>;

    fn open_devtools(&mut self);

    /// Hand `endpoint` to content, announcing it under `channel`.
    fn transfer_port(&mut self, channel: &str, endpoint: Endpoint) -> Result<(), WindowError>;

    fn set_title(&mut self, title: &str);

    fn set_theme(&mut self, theme: ThemeSource);

    /// Tear the window down. The window is not used afterwards.
    fn destroy(&mut self);
}
