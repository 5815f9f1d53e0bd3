//! Log file framing
//!
//! - `config`: writer configuration (WriterConfig, SyncMode)
//! - `sink`: output sink abstraction (LogSink)
//! - `writer`: header-then-blocks writer (LogWriter)
//! - `reader`: validating, torn-tail tolerant reader (LogReader)

pub mod config;
pub mod reader;
pub mod sink;
pub mod writer;

pub use config::{SyncMode, WriterConfig};
pub use reader::{read_all, LogReadResult, LogReader, ReadStopReason, Records};
pub use sink::LogSink;
pub use writer::{LogWriter, WriterCounters};

use std::io::{self, Read};

/// Read until `buf` is full or the source is exhausted.
///
/// Returns the number of bytes read; fewer than `buf.len()` means EOF.
pub(crate) fn read_full<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
