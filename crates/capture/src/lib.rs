//! Snapshot capture for Ambient Environment Logs
//!
//! Drives a [`SensorProvider`](ael_core::SensorProvider) and a
//! [`DeviceStateProvider`](ael_core::DeviceStateProvider) at a fixed
//! interval and appends one block per snapshot to an
//! [`ael_format::LogWriter`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod capture;
pub mod clock;
pub mod config;
pub mod error;
pub mod providers;

pub use capture::{capture_to_path, CaptureLoop, CaptureReport, OpenMode, Snapshot};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CaptureConfig, DEFAULT_LOG_PATH};
pub use error::{CaptureConfigError, CaptureError};
pub use providers::{
    mhz19_read_command, parse_mhz19_response, scale_sound_adc, FixedDeviceState, NoSensors,
    ScriptedSensors, SimulatedSensors,
};
