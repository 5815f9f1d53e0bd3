//! AEL file format for Ambient Environment Logs
//!
//! This crate handles everything that touches the log bytes:
//!
//! - Codec: pure translation of the 64-byte file header and 42-byte data
//!   blocks (little-endian, fixed field order)
//! - Writer: header-once, block-at-a-time appends with a configurable sync
//!   policy, plus resume-after-crash for existing files
//! - Reader: header validation and lazy block streaming that stops cleanly
//!   at a torn tail and hard-fails on a malformed complete block

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod format;
pub mod log;

pub use format::{
    decode_block, decode_header, encode_block, encode_header, BlockHeader, DecodedBlock,
    FileHeader, AEL_MAGIC, AEL_VERSION, BLOCK_CONTENT_SIZE, BLOCK_HEADER_SIZE, BLOCK_LENGTH,
    BLOCK_SIZE, FILE_HEADER_SIZE,
};
pub use log::{
    read_all, LogReadResult, LogReader, LogSink, LogWriter, ReadStopReason, Records, SyncMode,
    WriterConfig, WriterCounters,
};
