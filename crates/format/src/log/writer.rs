//! AEL log writer.
//!
//! The writer owns one sink for the lifetime of a capture session. The file
//! header is written at open; each block is then handed to the sink as a
//! single 42-byte `write_all`, so a crash leaves at worst a torn tail that
//! readers detect by length.
//!
//! The writer never retries. A failed append is reported to the caller and
//! the sink is cut back to the last block boundary so a later append stays
//! aligned. Sinks that cannot be cut leave the writer poisoned: every later
//! append fails without touching the sink.

use super::config::{SyncMode, WriterConfig};
use super::reader::{LogReader, ReadStopReason};
use super::sink::LogSink;
use crate::format::{encode_block, FileHeader, BLOCK_SIZE, FILE_HEADER_SIZE};
use ael_core::{unix_secs_now, AelError, Reading, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, error, warn};

/// Cumulative writer counters for the current session.
///
/// Blocks that were already in a resumed file are not counted here; see
/// [`LogWriter::prior_blocks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterCounters {
    /// Blocks appended
    pub blocks_written: u64,
    /// Bytes handed to the sink, header included
    pub bytes_written: u64,
    /// Sync calls issued
    pub sync_calls: u64,
    /// Appends whose timestamp was older than the previous block's
    pub timestamp_regressions: u64,
}

/// Append-only AEL writer over a [`LogSink`].
pub struct LogWriter<W: LogSink> {
    /// Output sink
    sink: W,

    /// Header of the log being written
    header: FileHeader,

    /// Configuration
    config: WriterConfig,

    /// Timestamp of the last block in the log, if any
    last_timestamp_ms: Option<u64>,

    /// Blocks already present when the writer was opened
    prior_blocks: u64,

    /// Session counters
    counters: WriterCounters,

    /// Set when a partial block could not be cut back off the sink
    poisoned: bool,
}

impl<W: LogSink> LogWriter<W> {
    /// Start a new log on `sink`, stamping the header with the current time.
    pub fn open(sink: W) -> Result<Self> {
        Self::open_with_config(sink, WriterConfig::default())
    }

    /// Start a new log on `sink` with explicit configuration.
    pub fn open_with_config(mut sink: W, config: WriterConfig) -> Result<Self> {
        let created_at = config.created_at_unix_seconds.unwrap_or_else(unix_secs_now);
        let header = FileHeader::new(created_at);

        sink.write_all(&header.to_bytes())?;

        let mut writer = LogWriter {
            sink,
            header,
            config,
            last_timestamp_ms: None,
            prior_blocks: 0,
            counters: WriterCounters {
                bytes_written: FILE_HEADER_SIZE as u64,
                ..WriterCounters::default()
            },
            poisoned: false,
        };
        writer.maybe_sync()?;

        debug!(created_at, version = header.version, "AEL header written");
        Ok(writer)
    }

    /// Append one snapshot.
    ///
    /// The encoded block reaches the sink in a single `write_all` call.
    /// Timestamps older than the previous block are accepted and logged.
    /// On a failed write the sink is cut back to the previous block
    /// boundary; if that fails too, the writer is poisoned.
    pub fn append_block(
        &mut self,
        timestamp_ms: u64,
        flags: u16,
        reading: &Reading,
    ) -> Result<()> {
        if self.poisoned {
            return Err(AelError::Io(io::Error::new(
                io::ErrorKind::Other,
                "log writer poisoned by an earlier partial block",
            )));
        }

        let block = encode_block(timestamp_ms, flags, reading);

        if let Err(err) = self.sink.write_all(&block) {
            self.discard_partial_block();
            return Err(err.into());
        }

        if let Some(previous) = self.last_timestamp_ms {
            if timestamp_ms < previous {
                self.counters.timestamp_regressions += 1;
                warn!(
                    previous_ms = previous,
                    timestamp_ms, "Block timestamp went backwards"
                );
            }
        }
        self.last_timestamp_ms = Some(timestamp_ms);
        self.counters.blocks_written += 1;
        self.counters.bytes_written += BLOCK_SIZE as u64;

        self.maybe_sync()?;

        debug!(
            timestamp_ms,
            flags,
            block = self.prior_blocks + self.counters.blocks_written,
            "AEL block appended"
        );
        Ok(())
    }

    /// Append one snapshot, mirroring its override byte into the block flags.
    pub fn append_reading(&mut self, timestamp_ms: u64, reading: &Reading) -> Result<()> {
        let flags = u16::from(reading.user_override.bits());
        self.append_block(timestamp_ms, flags, reading)
    }

    /// Flush buffered bytes to the sink without syncing.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and sync, then hand the sink back.
    pub fn close(mut self) -> Result<W> {
        self.sink.flush()?;
        self.sync_now()?;
        debug!(
            blocks = self.prior_blocks + self.counters.blocks_written,
            "AEL log closed"
        );
        Ok(self.sink)
    }

    /// Header of the log being written.
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Session counters.
    pub fn counters(&self) -> &WriterCounters {
        &self.counters
    }

    /// Blocks already present when the writer was opened.
    pub fn prior_blocks(&self) -> u64 {
        self.prior_blocks
    }

    /// Total blocks in the log, prior and new.
    pub fn total_blocks(&self) -> u64 {
        self.prior_blocks + self.counters.blocks_written
    }

    /// Timestamp of the most recent block.
    pub fn last_timestamp_ms(&self) -> Option<u64> {
        self.last_timestamp_ms
    }

    /// Configuration in use.
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// True once an append failed and the sink could not be realigned.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Byte offset just past the last whole block.
    pub fn block_boundary(&self) -> u64 {
        FILE_HEADER_SIZE as u64 + self.total_blocks() * BLOCK_SIZE as u64
    }

    fn discard_partial_block(&mut self) {
        let boundary = self.block_boundary();
        match self.sink.truncate_to(boundary) {
            Ok(()) => {
                warn!(boundary, "Append failed, log cut back to last whole block");
            }
            Err(e) => {
                self.poisoned = true;
                error!(
                    boundary,
                    error = %e,
                    "Append failed and log could not be cut back, writer poisoned"
                );
            }
        }
    }

    fn maybe_sync(&mut self) -> Result<()> {
        match self.config.sync {
            SyncMode::Always => self.sync_now(),
            SyncMode::OnClose => Ok(()),
        }
    }

    fn sync_now(&mut self) -> Result<()> {
        self.sink.sync()?;
        self.counters.sync_calls += 1;
        Ok(())
    }
}

impl LogWriter<File> {
    /// Create (or truncate) a log file at `path`.
    pub fn create(path: &Path, config: WriterConfig) -> Result<Self> {
        let file = File::create(path)?;
        Self::open_with_config(file, config)
    }

    /// Reopen an existing log for appending.
    ///
    /// Validates the header and every whole block, then cuts any torn tail
    /// back to the last whole-block boundary so new blocks stay aligned.
    /// A malformed block anywhere in the file is refused: blocks appended
    /// after it could never be read.
    pub fn resume(path: &Path, config: WriterConfig) -> Result<Self> {
        let mut file = OpenOptions::new().read(true).write(true).open(path)?;
        let original_size = file.metadata()?.len();

        let (header, prior_blocks, last_timestamp_ms, valid_end) = {
            let mut reader = LogReader::open(BufReader::new(&file))?;
            let mut last_timestamp_ms = None;
            for block in reader.records() {
                last_timestamp_ms = Some(block?.timestamp_ms);
            }
            if let Some(ReadStopReason::TornTail { trailing_bytes, .. }) = reader.stop_reason() {
                warn!(
                    path = %path.display(),
                    valid_end = reader.valid_end(),
                    trailing_bytes = *trailing_bytes,
                    "Truncating torn trailing block before resuming"
                );
            }
            (
                *reader.header(),
                reader.blocks_read(),
                last_timestamp_ms,
                reader.valid_end(),
            )
        };

        if valid_end < original_size {
            file.set_len(valid_end)?;
        }
        file.seek(SeekFrom::Start(valid_end))?;

        debug!(
            path = %path.display(),
            prior_blocks,
            created_at = header.created_at_unix_seconds,
            "AEL log resumed"
        );

        Ok(LogWriter {
            sink: file,
            header,
            config,
            last_timestamp_ms,
            prior_blocks,
            counters: WriterCounters::default(),
            poisoned: false,
        })
    }
}
