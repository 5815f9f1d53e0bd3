//! AEL file header format.
//!
//! # Header Layout (64 bytes, little-endian)
//!
//! ```text
//! ┌──────────────┬─────────────┬──────────────────┬─────────────────────┐
//! │ Magic (8)    │ Version (2) │ Created secs (8) │ Reserved (46, zero) │
//! └──────────────┴─────────────┴──────────────────┴─────────────────────┘
//! ```
//!
//! Reserved bytes are zero on write and ignored on read.

use ael_core::{AelError, Result};
use byteorder::{ByteOrder, LittleEndian};
use std::io;

/// Magic bytes identifying an AEL log: "AEL_LOG\0"
pub const AEL_MAGIC: [u8; 8] = *b"AEL_LOG\0";

/// Current (and highest supported) file format version
pub const AEL_VERSION: u16 = 1;

/// Size of the file header in bytes
pub const FILE_HEADER_SIZE: usize = 64;

/// Size of the reserved tail of the header
pub const HEADER_RESERVED_SIZE: usize = 46;

/// AEL file header.
///
/// Written once when a log is created and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Format version
    pub version: u16,

    /// File creation time, seconds since the Unix epoch
    pub created_at_unix_seconds: u64,
}

impl FileHeader {
    /// Create a header for the current format version.
    pub fn new(created_at_unix_seconds: u64) -> Self {
        FileHeader {
            version: AEL_VERSION,
            created_at_unix_seconds,
        }
    }

    /// Serialize header to bytes.
    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE] {
        let mut bytes = [0u8; FILE_HEADER_SIZE];
        bytes[0..8].copy_from_slice(&AEL_MAGIC);
        LittleEndian::write_u16(&mut bytes[8..10], self.version);
        LittleEndian::write_u64(&mut bytes[10..18], self.created_at_unix_seconds);
        bytes
    }

    /// Deserialize and validate a header.
    ///
    /// The magic is checked first, so a short foreign file still reports
    /// `BadMagic`. A short buffer carrying the right magic is an
    /// `UnexpectedEof` I/O error.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() >= AEL_MAGIC.len() && bytes[0..8] != AEL_MAGIC {
            let mut found = [0u8; 8];
            found.copy_from_slice(&bytes[0..8]);
            return Err(AelError::BadMagic { found });
        }

        if bytes.len() < FILE_HEADER_SIZE {
            return Err(AelError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Incomplete file header: {} of {} bytes",
                    bytes.len(),
                    FILE_HEADER_SIZE
                ),
            )));
        }

        let version = LittleEndian::read_u16(&bytes[8..10]);
        if version > AEL_VERSION {
            return Err(AelError::UnsupportedVersion {
                found: version,
                supported: AEL_VERSION,
            });
        }

        Ok(FileHeader {
            version,
            created_at_unix_seconds: LittleEndian::read_u64(&bytes[10..18]),
        })
    }
}

/// Encode a current-version header.
pub fn encode_header(created_at_unix_seconds: u64) -> [u8; FILE_HEADER_SIZE] {
    FileHeader::new(created_at_unix_seconds).to_bytes()
}

/// Decode and validate a header.
pub fn decode_header(bytes: &[u8]) -> Result<FileHeader> {
    FileHeader::from_bytes(bytes)
}
