//! Core types and traits for AEL
//!
//! This crate defines the foundational types shared by the format, capture
//! and CLI crates:
//! - Reading: the ten content fields of one snapshot
//! - DeviceState: smart-device configuration captured alongside a reading
//! - UserOverride: typed set over the override bitmask
//! - SensorValue / SensorSnapshot: per-field sensor validity
//! - Traits: collaborator interfaces (SensorProvider, DeviceStateProvider)
//! - Error: the AEL error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod override_flags;
pub mod sensor;
pub mod time;
pub mod traits;
pub mod types;

pub use error::{AelError, BlockDefect, Result};
pub use override_flags::{OverrideDevice, UserOverride};
pub use sensor::{SensorField, SensorSnapshot, SensorValue};
pub use time::{unix_millis_now, unix_secs_now};
pub use traits::{DeviceStateProvider, SensorProvider};
pub use types::{DeviceState, Reading};
