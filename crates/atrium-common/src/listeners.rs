//! Listener registry with scoped subscriptions.
//!
//! Used for transport message delivery and window signals. Every
//! `subscribe` returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the listener.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_key: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// A set of callbacks invoked in registration order.
pub struct Listeners<T> {
    inner: Arc<Mutex<Registry<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_key: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Register a callback. It stays registered until the returned
    /// subscription is dropped or unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let key = {
            let mut reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            let key = reg.next_key;
            reg.next_key += 1;
            reg.entries.push((key, Arc::new(listener)));
            key
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut reg = inner.lock().unwrap_or_else(PoisonError::into_inner);
                reg.entries.retain(|(k, _)| *k != key);
            }
        })
    }

    /// Invoke every listener with `value`. Returns how many were called.
    ///
    /// Listeners are snapshotted before the call, so a listener may
    /// subscribe or unsubscribe without deadlocking.
    pub fn emit(&self, value: &T) -> usize {
        let snapshot: Vec<Callback<T>> = {
            let reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            reg.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for cb in &snapshot {
            cb(value);
        }
        snapshot.len()
    }

    /// Drop every listener. Outstanding subscriptions become no-ops.
    pub fn clear(&self) {
        let mut reg = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        reg.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Listeners<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle returned by `subscribe`. Unsubscribes on drop.
pub struct Subscription {
    cancel: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    pub fn new<F>(cancel: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            cancel: Mutex::new(Some(Box::new(cancel))),
        }
    }

    /// Remove the listener. Safe to call any number of times.
    pub fn unsubscribe(&self) {
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
