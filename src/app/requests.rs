use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing request ids. Only the most recently issued id may
/// touch the display; anything older that completes later is stale.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Arc<AtomicU64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id, superseding every earlier one.
    pub fn issue(&self) -> RequestId {
        RequestId(self.latest.fetch_add(1, Ordering::SeqCst).wrapping_add(1))
    }

    pub fn is_latest(&self, id: RequestId) -> bool {
        self.latest.load(Ordering::SeqCst) == id.0
    }
}
