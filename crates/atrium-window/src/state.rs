//! Persisted window geometry.
//!
//! One JSON file holds an object keyed by logical window name:
//!
//! ```json
//! {"main": {"bounds": {"x": 100, "y": 50, "width": 1200, "height": 900}, "maximized": false}}
//! ```
//!
//! Reads never fail hard: a missing or corrupt file is treated as empty.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use atrium_common::{Bounds, StateError, Subscription};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::events::WindowSignal;
use crate::manager::WindowHandle;

/// Logical key of the application's main window.
pub const MAIN_WINDOW_KEY: &str = "main";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    pub bounds: Bounds,
    #[serde(default)]
    pub maximized: bool,
}

type StateMap = BTreeMap<String, WindowState>;

struct StoreInner {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

/// Handle to the window state file. Cheap to clone.
#[derive(Clone)]
pub struct WindowStateStore {
    inner: Arc<StoreInner>,
}

impl WindowStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path: path.into(),
                write_lock: Mutex::new(()),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Saved state for `key`, or `None` if absent, unreadable or corrupt.
    pub fn load(&self, key: &str) -> Option<WindowState> {
        match self.read_map() {
            Ok(mut map) => map.remove(key),
            Err(e) => {
                warn!(path = %self.inner.path.display(), "ignoring window state: {e}");
                None
            }
        }
    }

    /// Persist `state` under `key`, keeping other keys intact.
    pub fn save(&self, key: &str, state: &WindowState) -> Result<(), StateError> {
        let _guard = self
            .inner
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut map = self.read_map().unwrap_or_default();
        map.insert(key.to_owned(), *state);
        self.write_map(&map)?;
        debug!(key, ?state, "window state saved");
        Ok(())
    }

    /// Save `key` every time `handle` reports new bounds or a maximize
    /// change, starting from `initial`, the state the window was created
    /// with. Stops when the subscription is dropped.
    ///
    /// While maximized, bounds changes are not recorded so the restored
    /// size survives.
    pub fn manage(&self, handle: &WindowHandle, key: &str, initial: WindowState) -> Subscription {
        let store = self.clone();
        let key = key.to_owned();
        let current = Mutex::new(initial);

        handle.subscribe(move |signal| {
            let mut state = current.lock().unwrap_or_else(PoisonError::into_inner);
            match signal {
                WindowSignal::BoundsChanged(bounds) if !state.maximized => state.bounds = *bounds,
                WindowSignal::Maximized(maximized) => state.maximized = *maximized,
                _ => return,
            }
            if let Err(e) = store.save(&key, &state) {
                warn!(key = %key, "failed to persist window state: {e}");
            }
        })
    }

    fn read_map(&self) -> Result<StateMap, StateError> {
        let content = match std::fs::read_to_string(&self.inner.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(StateMap::new()),
            Err(source) => {
                return Err(StateError::Io {
                    path: self.inner.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| StateError::Corrupt(e.to_string()))
    }

    fn write_map(&self, map: &StateMap) -> Result<(), StateError> {
        let path = &self.inner.path;
        let io_err = |source| StateError::Io {
            path: path.clone(),
            source,
        };

        let json =
            serde_json::to_string_pretty(map).map_err(|e| StateError::Corrupt(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(io_err)?;
        if let Err(e) = std::fs::rename(&tmp_path, path) {
            warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(path, &json).map_err(io_err)?;
            let _ = std::fs::remove_file(&tmp_path);
        }
        Ok(())
    }
}

impl std::fmt::Debug for WindowStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowStateStore")
            .field("path", &self.inner.path)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
