//! Per-field sensor validity
//!
//! Providers report each measurement as a [`SensorValue`] so that "measured
//! zero" and "sensor absent" stay distinguishable in memory. The wire format
//! has no validity bits; unavailable fields are encoded as zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single sensor read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorValue<T> {
    /// The sensor produced a value
    Measured(T),
    /// The sensor is missing or the read failed
    Unavailable,
}

impl<T: Copy + Default> SensorValue<T> {
    /// The measured value, or the type's zero when unavailable.
    pub fn value_or_default(self) -> T {
        match self {
            SensorValue::Measured(value) => value,
            SensorValue::Unavailable => T::default(),
        }
    }
}

impl<T> SensorValue<T> {
    /// True when the sensor produced a value.
    pub fn is_measured(&self) -> bool {
        matches!(self, SensorValue::Measured(_))
    }

    /// The measured value, if any.
    pub fn measured(self) -> Option<T> {
        match self {
            SensorValue::Measured(value) => Some(value),
            SensorValue::Unavailable => None,
        }
    }

    /// Map the measured value.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SensorValue<U> {
        match self {
            SensorValue::Measured(value) => SensorValue::Measured(f(value)),
            SensorValue::Unavailable => SensorValue::Unavailable,
        }
    }
}

impl<T> From<Option<T>> for SensorValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => SensorValue::Measured(value),
            None => SensorValue::Unavailable,
        }
    }
}

/// Identifies one ambient measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorField {
    /// Light, lux
    Light,
    /// Sound, 0-100 scaled
    Sound,
    /// Temperature, °C
    Temperature,
    /// Humidity, %RH
    Humidity,
    /// CO2, ppm
    Co2,
}

impl SensorField {
    /// All fields in wire order.
    pub const ALL: [SensorField; 5] = [
        SensorField::Light,
        SensorField::Sound,
        SensorField::Temperature,
        SensorField::Humidity,
        SensorField::Co2,
    ];

    /// Stable lowercase name, used as a log field value.
    pub const fn name(self) -> &'static str {
        match self {
            SensorField::Light => "light",
            SensorField::Sound => "sound",
            SensorField::Temperature => "temperature",
            SensorField::Humidity => "humidity",
            SensorField::Co2 => "co2",
        }
    }
}

impl fmt::Display for SensorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One sample of every ambient sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Light, lux
    pub light: SensorValue<f32>,
    /// Sound, 0-100 scaled
    pub sound: SensorValue<f32>,
    /// Temperature, °C
    pub temperature: SensorValue<f32>,
    /// Humidity, %RH
    pub humidity: SensorValue<f32>,
    /// CO2, ppm
    pub co2: SensorValue<u16>,
}

impl SensorSnapshot {
    /// A snapshot where every sensor is unavailable.
    pub const UNAVAILABLE: SensorSnapshot = SensorSnapshot {
        light: SensorValue::Unavailable,
        sound: SensorValue::Unavailable,
        temperature: SensorValue::Unavailable,
        humidity: SensorValue::Unavailable,
        co2: SensorValue::Unavailable,
    };

    /// Whether the given field was measured.
    pub fn is_measured(&self, field: SensorField) -> bool {
        match field {
            SensorField::Light => self.light.is_measured(),
            SensorField::Sound => self.sound.is_measured(),
            SensorField::Temperature => self.temperature.is_measured(),
            SensorField::Humidity => self.humidity.is_measured(),
            SensorField::Co2 => self.co2.is_measured(),
        }
    }

    /// Fields that fell back to their default, in wire order.
    pub fn unavailable_fields(&self) -> impl Iterator<Item = SensorField> + '_ {
        SensorField::ALL
            .into_iter()
            .filter(move |field| !self.is_measured(*field))
    }

    /// In-memory validity mask: bit `i` is set when field `i` (wire order)
    /// was measured.
    pub fn validity_mask(&self) -> u8 {
        SensorField::ALL
            .iter()
            .enumerate()
            .filter(|(_, field)| self.is_measured(**field))
            .fold(0u8, |mask, (i, _)| mask | (1 << i))
    }
}
