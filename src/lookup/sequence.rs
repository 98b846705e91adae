//! Request sequence numbers
//!
//! Every lookup takes a number when it starts; only the most recently issued
//! number may commit its result.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter of issued lookups
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next sequence number (first is 1)
    pub fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Highest number issued so far (0 before any lookup)
    pub fn latest(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Whether `seq` is still the most recent lookup
    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest() == seq
    }
}
