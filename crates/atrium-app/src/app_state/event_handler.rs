//! `ApplicationHandler` implementation for the winit event loop.

use atrium_window::WindowSignal;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::AtriumApp;
use super::init::WinitBackend;

impl ApplicationHandler for AtriumApp {
    /// Startup and re-activation both bring the main window forward.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let mut backend = WinitBackend::new(
            event_loop,
            self.webview_events.clone(),
            self.content.clone(),
        );
        match self.manager.show_window(&mut backend) {
            Ok(handle) => tracing::info!(window_id = %handle.id(), "main window ready"),
            Err(e) => {
                tracing::error!("Failed to create main window: {e}");
                self.should_exit = true;
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let is_main = self
            .manager
            .current_window_mut()
            .is_some_and(|w| w.winit_id() == window_id);
        if !is_main {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.signal(WindowSignal::CloseRequested);
                if self.manager.current().is_none() {
                    self.shutdown();
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(_) | WindowEvent::Moved(_) => {
                let signals = self
                    .manager
                    .current_window_mut()
                    .map(|w| w.sync_state())
                    .unwrap_or_default();
                for signal in signals {
                    self.signal(signal);
                }
            }

            WindowEvent::Destroyed => {
                tracing::warn!("Main window destroyed by the platform");
                self.manager.close();
                self.should_exit = true;
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            self.shutdown();
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}
