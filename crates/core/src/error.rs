//! Error types for AEL
//!
//! Every fallible operation of the format layer reports an [`AelError`].
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Sensor failures are absent: they are absorbed at the provider
//! boundary (see [`crate::SensorValue`]) and never reach the format layer.
//! A torn trailing block is not an error either; readers report it as a stop
//! reason.

use std::io;
use thiserror::Error;

/// Result type alias for AEL operations
pub type Result<T> = std::result::Result<T, AelError>;

/// Error types for reading and writing AEL logs
#[derive(Debug, Error)]
pub enum AelError {
    /// Sink or source unavailable, unreadable or unwritable
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The first 8 bytes are not the AEL tag
    #[error("Bad magic: not an AEL log (found {found:02x?})")]
    BadMagic {
        /// Bytes found where the tag was expected
        found: [u8; 8],
    },

    /// The header version is newer than this implementation understands
    #[error("Unsupported version: {found} (highest supported: {supported})")]
    UnsupportedVersion {
        /// Version read from the header
        found: u16,
        /// Highest version this build can decode
        supported: u16,
    },

    /// A complete-size block failed structural validation
    #[error("Malformed block: {0}")]
    MalformedBlock(#[from] BlockDefect),
}

impl AelError {
    /// Check whether this error indicates a damaged or foreign file rather
    /// than an I/O failure.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            AelError::BadMagic { .. } | AelError::MalformedBlock(_)
        )
    }
}

/// Why a block buffer was rejected by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BlockDefect {
    /// Buffer is smaller than one fixed-size block
    #[error("buffer holds {len} bytes, a block needs {expected}")]
    TooShort {
        /// Bytes available
        len: usize,
        /// Bytes required
        expected: usize,
    },

    /// The block header declares a length this version does not support
    #[error("declared block length {declared}, expected {expected}")]
    LengthMismatch {
        /// Length read from the block header
        declared: u32,
        /// The only length this version supports
        expected: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let err = AelError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_error_display_bad_magic() {
        let err = AelError::BadMagic { found: *b"WPILOG\0\0" };
        let msg = err.to_string();
        assert!(msg.contains("Bad magic"));
        assert!(err.is_corruption());
    }

    #[test]
    fn test_error_display_unsupported_version() {
        let err = AelError::UnsupportedVersion {
            found: 7,
            supported: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("7"));
        assert!(msg.contains("highest supported: 1"));
        assert!(!err.is_corruption());
    }

    #[test]
    fn test_malformed_block_from_defect() {
        let err: AelError = BlockDefect::LengthMismatch {
            declared: 99,
            expected: 42,
        }
        .into();
        assert!(matches!(
            err,
            AelError::MalformedBlock(BlockDefect::LengthMismatch { declared: 99, .. })
        ));
        assert!(err.to_string().contains("declared block length 99"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
        let err: AelError = io_err.into();
        assert!(matches!(err, AelError::Io(_)));
    }
}
