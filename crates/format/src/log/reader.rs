//! AEL log reader.
//!
//! The reader validates the file header up front, then streams blocks
//! lazily. A short trailing block is the expected artifact of a crash
//! mid-append and ends the stream cleanly. A complete-size block that fails
//! to decode is real corruption: it is yielded as an error and ends the
//! stream, since the fixed framing gives no safe resync point.

use super::read_full;
use crate::format::{
    decode_block, decode_header, DecodedBlock, FileHeader, BLOCK_SIZE, FILE_HEADER_SIZE,
};
use ael_core::{AelError, BlockDefect, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;
use tracing::{debug, warn};

/// Reason why block reading stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadStopReason {
    /// Every byte after the header belonged to a whole block
    EndOfData,
    /// A partial block was found at the end (expected after a crash)
    TornTail {
        /// Byte offset where the partial block starts
        offset: u64,
        /// Number of bytes in the partial block (1-41)
        trailing_bytes: usize,
    },
    /// A complete-size block failed to decode
    Malformed {
        /// Byte offset of the bad block
        offset: u64,
        /// What was wrong with it
        defect: BlockDefect,
    },
    /// The source failed mid-stream
    IoError {
        /// Byte offset of the failed read
        offset: u64,
        /// Human-readable error description
        detail: String,
    },
}

impl ReadStopReason {
    /// True when reading ended without surfacing an error.
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            ReadStopReason::EndOfData | ReadStopReason::TornTail { .. }
        )
    }
}

/// Streaming AEL reader over any byte source.
pub struct LogReader<R: Read> {
    /// Byte source, positioned after the last consumed block
    source: R,

    /// Validated file header
    header: FileHeader,

    /// Bytes consumed from the start of the file
    offset: u64,

    /// Blocks yielded so far
    blocks_read: u64,

    /// Timestamp of the last yielded block
    last_timestamp_ms: Option<u64>,

    /// Blocks whose timestamp was older than their predecessor's
    timestamp_regressions: u64,

    /// Set once the stream has ended
    stop_reason: Option<ReadStopReason>,
}

impl<R: Read> LogReader<R> {
    /// Read and validate the file header.
    ///
    /// Fails with `BadMagic`, `UnsupportedVersion` or `Io`; there is no
    /// partial-header recovery.
    pub fn open(mut source: R) -> Result<Self> {
        let mut header_bytes = [0u8; FILE_HEADER_SIZE];
        let n = read_full(&mut source, &mut header_bytes)?;
        let header = decode_header(&header_bytes[..n])?;

        debug!(
            version = header.version,
            created_at = header.created_at_unix_seconds,
            "AEL header validated"
        );

        Ok(LogReader {
            source,
            header,
            offset: FILE_HEADER_SIZE as u64,
            blocks_read: 0,
            last_timestamp_ms: None,
            timestamp_regressions: 0,
            stop_reason: None,
        })
    }

    /// Lazy sequence of decoded blocks.
    ///
    /// The sequence is not restartable: once it has ended, later calls
    /// yield nothing. Re-reading requires a fresh [`LogReader::open`].
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self }
    }

    /// Read the next block, or `None` once the stream has ended.
    pub fn next_block(&mut self) -> Option<Result<DecodedBlock>> {
        if self.stop_reason.is_some() {
            return None;
        }

        let mut buf = [0u8; BLOCK_SIZE];
        let n = match read_full(&mut self.source, &mut buf) {
            Ok(n) => n,
            Err(e) => {
                self.stop_reason = Some(ReadStopReason::IoError {
                    offset: self.offset,
                    detail: e.to_string(),
                });
                return Some(Err(AelError::Io(e)));
            }
        };

        if n == 0 {
            self.stop_reason = Some(ReadStopReason::EndOfData);
            return None;
        }

        if n < BLOCK_SIZE {
            warn!(
                offset = self.offset,
                trailing_bytes = n,
                "Torn trailing block, stopping"
            );
            self.stop_reason = Some(ReadStopReason::TornTail {
                offset: self.offset,
                trailing_bytes: n,
            });
            return None;
        }

        match decode_block(&buf) {
            Ok(block) => {
                if let Some(previous) = self.last_timestamp_ms {
                    if block.timestamp_ms < previous {
                        self.timestamp_regressions += 1;
                        warn!(
                            offset = self.offset,
                            previous_ms = previous,
                            timestamp_ms = block.timestamp_ms,
                            "Block timestamp went backwards"
                        );
                    }
                }
                self.last_timestamp_ms = Some(block.timestamp_ms);
                self.offset += BLOCK_SIZE as u64;
                self.blocks_read += 1;
                Some(Ok(block))
            }
            Err(err) => {
                self.stop_reason = Some(match &err {
                    AelError::MalformedBlock(defect) => {
                        warn!(offset = self.offset, %defect, "Malformed block, stopping");
                        ReadStopReason::Malformed {
                            offset: self.offset,
                            defect: *defect,
                        }
                    }
                    other => ReadStopReason::IoError {
                        offset: self.offset,
                        detail: other.to_string(),
                    },
                });
                Some(Err(err))
            }
        }
    }

    /// Validated file header.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Blocks yielded so far.
    pub fn blocks_read(&self) -> u64 {
        self.blocks_read
    }

    /// Blocks whose timestamp was older than their predecessor's.
    pub fn timestamp_regressions(&self) -> u64 {
        self.timestamp_regressions
    }

    /// Byte offset just past the last whole, valid block.
    pub fn valid_end(&self) -> u64 {
        self.offset
    }

    /// Why the stream ended, or `None` while it is still open.
    pub fn stop_reason(&self) -> Option<&ReadStopReason> {
        self.stop_reason.as_ref()
    }

    /// True once the stream has ended.
    pub fn is_finished(&self) -> bool {
        self.stop_reason.is_some()
    }

    /// Release the reader, returning the source.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl LogReader<BufReader<File>> {
    /// Open a log file through a buffered reader.
    pub fn open_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::open(BufReader::new(file))
    }
}

/// Iterator over the blocks of a [`LogReader`].
pub struct Records<'a, R: Read> {
    reader: &'a mut LogReader<R>,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<DecodedBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_block()
    }
}

impl<R: Read> FusedIterator for Records<'_, R> {}

/// Everything readable from one log file.
#[derive(Debug)]
pub struct LogReadResult {
    /// Validated file header
    pub header: FileHeader,

    /// All blocks in file order
    pub blocks: Vec<DecodedBlock>,

    /// Why reading stopped (`EndOfData` or `TornTail`)
    pub stop_reason: ReadStopReason,

    /// Blocks whose timestamp was older than their predecessor's
    pub timestamp_regressions: u64,

    /// Byte offset just past the last whole block
    pub valid_end: u64,
}

impl LogReadResult {
    /// Size of the torn tail, or 0.
    pub fn torn_bytes(&self) -> usize {
        match self.stop_reason {
            ReadStopReason::TornTail { trailing_bytes, .. } => trailing_bytes,
            _ => 0,
        }
    }
}

/// Read a whole log file.
///
/// A torn tail is reported in the result; a malformed block or an I/O
/// failure is returned as an error.
pub fn read_all(path: &Path) -> Result<LogReadResult> {
    let mut reader = LogReader::open_path(path)?;
    let blocks = reader.records().collect::<Result<Vec<_>>>()?;

    Ok(LogReadResult {
        header: *reader.header(),
        blocks,
        stop_reason: reader
            .stop_reason()
            .cloned()
            .unwrap_or(ReadStopReason::EndOfData),
        timestamp_regressions: reader.timestamp_regressions(),
        valid_end: reader.valid_end(),
    })
}
