//! Structured error types for trendwatch
//!
//! Using thiserror for automatic Display implementation and error chaining.

use std::time::Duration;
use thiserror::Error;

/// Failure modes of a single backend call.
///
/// Callers treat all three variants uniformly (one generic error
/// notification per operation); the split exists for logging and tests.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server returned status {0}")]
    Status(u16),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl GatewayError {
    /// True when the deadline fired before a response arrived.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
