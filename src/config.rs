// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Tracker configuration.

use serde::{Deserialize, Serialize};

/// Bucket count used when none is given.
pub const DEFAULT_BUCKETS: usize = 20_000;

/// Sizing for a [`ChatTracker`](crate::ChatTracker).
///
/// The bucket count applies uniformly to the active, departed and chat
/// indexes and never changes after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Hash buckets per index. Zero is treated as one.
    pub buckets: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        return TrackerConfig {
            buckets: DEFAULT_BUCKETS,
        };
    }
}

impl TrackerConfig {
    pub fn with_buckets(buckets: usize) -> TrackerConfig {
        return TrackerConfig { buckets };
    }

    /// The bucket count actually allocated.
    pub fn effective_buckets(&self) -> usize {
        return self.buckets.max(1);
    }
}
