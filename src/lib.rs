//! AEL - Ambient Environment Log
//!
//! An append-only binary log for environmental telemetry: a 64-byte file
//! header followed by fixed 42-byte blocks, each holding one snapshot of
//! five ambient measurements and the smart-device configuration at capture
//! time.
//!
//! # Quick Start
//!
//! ```no_run
//! use ael::{read_all, CaptureConfig, CaptureLoop, FixedDeviceState, NoSensors};
//! use ael::{capture_to_path, OpenMode, WriterConfig};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("environment_log.ael");
//! let mut session = CaptureLoop::new(
//!     NoSensors,
//!     FixedDeviceState::default(),
//!     CaptureConfig::new().with_snapshots(3),
//! )?;
//! capture_to_path(path, OpenMode::Create, &mut session, WriterConfig::new())?;
//!
//! for block in read_all(path)?.blocks {
//!     println!("{} ms: {:.1} °C", block.timestamp_ms, block.reading.temperature);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`ael_core`]: value types, provider traits, errors
//! - [`ael_format`]: the byte codec plus streaming writer and reader
//! - [`ael_capture`]: the periodic capture loop and stock providers

pub use ael_capture;
pub use ael_core;
pub use ael_format;

pub use ael_capture::{
    capture_to_path, CaptureConfig, CaptureConfigError, CaptureError, CaptureLoop, CaptureReport,
    Clock, FixedDeviceState, ManualClock, NoSensors, OpenMode, ScriptedSensors, SimulatedSensors,
    Snapshot, SystemClock, DEFAULT_LOG_PATH,
};
pub use ael_core::{
    AelError, BlockDefect, DeviceState, DeviceStateProvider, OverrideDevice, Reading, Result,
    SensorField, SensorProvider, SensorSnapshot, SensorValue, UserOverride,
};
pub use ael_format::{
    decode_block, decode_header, encode_block, encode_header, read_all, DecodedBlock, FileHeader,
    LogReadResult, LogReader, LogWriter, ReadStopReason, SyncMode, WriterConfig, AEL_MAGIC,
    AEL_VERSION, BLOCK_SIZE, FILE_HEADER_SIZE,
};
