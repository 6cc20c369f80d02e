use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use atrium_common::{Bounds, Listeners, Subscription, WindowId};

use crate::events::WindowSignal;

struct HandleState {
    bounds: Mutex<Bounds>,
    visible: AtomicBool,
    destroyed: AtomicBool,
    signals: Listeners<WindowSignal>,
}

/// Shared reference to the managed window. Clones observe the same window.
#[derive(Clone)]
pub struct WindowHandle {
    id: WindowId,
    state: Arc<HandleState>,
}

impl WindowHandle {
    pub(crate) fn new(id: WindowId, bounds: Bounds) -> Self {
        Self {
            id,
            state: Arc::new(HandleState {
                bounds: Mutex::new(bounds),
                visible: AtomicBool::new(false),
                destroyed: AtomicBool::new(false),
                signals: Listeners::new(),
            }),
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Last bounds reported by the platform.
    pub fn bounds(&self) -> Bounds {
        *self
            .state
            .bounds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible.load(Ordering::Acquire)
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed.load(Ordering::Acquire)
    }

    /// Observe this window's signals until the subscription is dropped.
    /// Nothing is delivered once the window is destroyed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&WindowSignal) + Send + Sync + 'static,
    {
        self.state.signals.subscribe(listener)
    }

    pub(crate) fn emit(&self, signal: &WindowSignal) {
        if self.is_destroyed() {
            return;
        }
        if let WindowSignal::BoundsChanged(bounds) = signal {
            *self
                .state
                .bounds
                .lock()
                .unwrap_or_else(PoisonError::into_inner) = *bounds;
        }
        self.state.signals.emit(signal);
    }

    pub(crate) fn set_visible(&self, visible: bool) {
        self.state.visible.store(visible, Ordering::Release);
    }

    pub(crate) fn mark_destroyed(&self) {
        self.state.destroyed.store(true, Ordering::Release);
        self.state.visible.store(false, Ordering::Release);
        self.state.signals.clear();
    }
}

impl std::fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowHandle")
            .field("id", &self.id)
            .field("bounds", &self.bounds())
            .field("visible", &self.is_visible())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}
