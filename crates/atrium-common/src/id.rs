use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter for ids that only need to be unique within one owner
/// (RPC correlation ids, window ids). Starts at 1.
#[derive(Debug)]
pub struct Sequence(AtomicU64);

impl Sequence {
    pub const fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}
