//! Capture session configuration.

use crate::error::CaptureConfigError;
use std::time::Duration;

/// File written when no output path is given.
pub const DEFAULT_LOG_PATH: &str = "environment_log.ael";

/// Upper bound on the pause between snapshots.
const MAX_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Capture session parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Number of snapshots to record (default: 10).
    pub snapshots: u64,

    /// Pause between consecutive snapshots (default: 2s).
    ///
    /// No pause follows the final snapshot.
    pub interval: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            snapshots: 10,
            interval: Duration::from_secs(2),
        }
    }
}

impl CaptureConfig {
    /// Create a capture configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set snapshot count (builder pattern).
    pub fn with_snapshots(mut self, snapshots: u64) -> Self {
        self.snapshots = snapshots;
        self
    }

    /// Set the inter-snapshot interval (builder pattern).
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), CaptureConfigError> {
        if self.snapshots == 0 {
            return Err(CaptureConfigError::NoSnapshots);
        }
        if self.interval > MAX_INTERVAL {
            return Err(CaptureConfigError::IntervalTooLong {
                interval: self.interval,
            });
        }
        Ok(())
    }

    /// Three snapshots, one second apart.
    pub fn for_testing() -> Self {
        CaptureConfig {
            snapshots: 3,
            interval: Duration::from_secs(1),
        }
    }
}
