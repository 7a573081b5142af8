//! Errors raised by the normalizer itself.
//!
//! Malformed input is not an error (it becomes U+FFFD) and sink failures are
//! the caller's own error type, so only resource problems live here.

use std::collections::TryReserveError;

use thiserror::Error;

/// Failure of a normalization call that is not caused by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The decomposition buffer could not grow. The normalizer is poisoned
    /// until [`crate::Normalizer::reset`] is called.
    #[error("failed to grow the decomposition buffer by {requested} entries")]
    Allocation {
        /// Number of entries the buffer tried to add.
        requested: usize,
        /// Allocator failure reported by the standard library.
        #[source]
        source: TryReserveError,
    },

    /// A previous allocation failure left the normalizer unusable.
    #[error("normalizer is unusable after a failed allocation; reset or drop it")]
    Poisoned,
}
