//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window manager, the capability host and the tokio
//! runtime serving content's calls.

mod core;
mod desktop_window;
mod event_handler;
mod init;
mod polling;
mod shutdown;
mod types;

pub use self::core::AtriumApp;
