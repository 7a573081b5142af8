//! Tunables of a [`crate::Normalizer`].

use serde::{Deserialize, Serialize};

/// Entry count at which the finalized prefix is flushed.
pub const DEFAULT_FLUSH_THRESHOLD: usize = 1024;

/// Entries reserved by the first buffer growth.
pub const DEFAULT_INITIAL_CAPACITY: usize = 4096;

/// Buffer sizing for a normalizer.
///
/// Missing fields fall back to their defaults, so `{"flush_threshold": 64}`
/// is a valid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerOptions {
    /// Flush once a new starter lands at or past this index.
    pub flush_threshold: usize,
    /// Entries reserved up front.
    pub initial_capacity: usize,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
