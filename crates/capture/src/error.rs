//! Capture error types.

use ael_core::AelError;
use std::time::Duration;

/// Capture configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureConfigError {
    /// A session must record at least one snapshot.
    #[error("snapshot count must be at least 1")]
    NoSnapshots,

    /// Interval longer than one day.
    #[error("interval {interval:?} exceeds the 24h maximum")]
    IntervalTooLong {
        /// The rejected interval
        interval: Duration,
    },
}

/// Errors that end a capture session.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Creating, resuming or appending to the log failed
    #[error(transparent)]
    Log(#[from] AelError),

    /// The session parameters were rejected before anything was written
    #[error("invalid capture configuration: {0}")]
    Config(#[from] CaptureConfigError),
}

impl From<std::io::Error> for CaptureError {
    fn from(e: std::io::Error) -> Self {
        CaptureError::Log(AelError::Io(e))
    }
}
