//! Error types for the sampling primitives
//!
//! Every operation in this crate is a pure computation over an injected random
//! source, so failures are limited to violated preconditions. They are reported
//! immediately, before any random draw is consumed.
//!
//! Two kinds are kept apart so callers can tell a bad range from a bad size:
//!
//! - [`SampleError::InvalidArgument`]: non-positive bound, `origin >= bound`,
//!   `k > n`, a window below the minimum, or `n` too small for the requested
//!   pair/triple.
//! - [`SampleError::NegativeSize`]: a negative element count (`k < 0`, `n < 0`).

use thiserror::Error;

/// Precondition failure raised by a sampling operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// An argument is outside the range the operation accepts
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A count that sizes an output was negative
    #[error("negative size: {0}")]
    NegativeSize(i32),
}

impl SampleError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SampleError::InvalidArgument(message.into())
    }
}

/// Result type used by the sampling primitives
pub type Result<T> = std::result::Result<T, SampleError>;
