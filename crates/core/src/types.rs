//! Snapshot value types
//!
//! A [`Reading`] is the in-memory form of one block's content: five ambient
//! measurements followed by the device configuration at capture time.

use crate::override_flags::UserOverride;
use crate::sensor::SensorSnapshot;
use serde::{Deserialize, Serialize};

/// The ten content fields of one snapshot.
///
/// Field order matches the wire order. Equality is IEEE equality on the
/// float fields; use [`Reading::bitwise_eq`] when NaN payloads matter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Ambient light in lux
    pub light: f32,
    /// Sound level, 0-100 scaled (not dB)
    pub sound: f32,
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in %
    pub humidity: f32,
    /// CO2 concentration in ppm
    pub co2: u16,
    /// Light brightness setpoint, 0-100
    pub light_brightness: u8,
    /// HVAC setpoint in °C
    pub hvac_setpoint: f32,
    /// HVAC fan speed setpoint, 0-100
    pub hvac_fan_speed: u8,
    /// Blinds position, 0-100 (0 = closed)
    pub blinds_position: u8,
    /// Devices under manual override
    pub user_override: UserOverride,
}

impl Reading {
    /// Combine one sensor sample with one device snapshot.
    ///
    /// Unavailable sensor fields become zero.
    pub fn compose(sensors: &SensorSnapshot, device: &DeviceState) -> Self {
        Reading {
            light: sensors.light.value_or_default(),
            sound: sensors.sound.value_or_default(),
            temperature: sensors.temperature.value_or_default(),
            humidity: sensors.humidity.value_or_default(),
            co2: sensors.co2.value_or_default(),
            light_brightness: device.light_brightness,
            hvac_setpoint: device.hvac_setpoint,
            hvac_fan_speed: device.hvac_fan_speed,
            blinds_position: device.blinds_position,
            user_override: device.user_override,
        }
    }

    /// The device half of this reading.
    pub fn device_state(&self) -> DeviceState {
        DeviceState {
            light_brightness: self.light_brightness,
            hvac_setpoint: self.hvac_setpoint,
            hvac_fan_speed: self.hvac_fan_speed,
            blinds_position: self.blinds_position,
            user_override: self.user_override,
        }
    }

    /// Bit-for-bit comparison, treating identical NaN payloads as equal.
    pub fn bitwise_eq(&self, other: &Reading) -> bool {
        self.light.to_bits() == other.light.to_bits()
            && self.sound.to_bits() == other.sound.to_bits()
            && self.temperature.to_bits() == other.temperature.to_bits()
            && self.humidity.to_bits() == other.humidity.to_bits()
            && self.co2 == other.co2
            && self.light_brightness == other.light_brightness
            && self.hvac_setpoint.to_bits() == other.hvac_setpoint.to_bits()
            && self.hvac_fan_speed == other.hvac_fan_speed
            && self.blinds_position == other.blinds_position
            && self.user_override == other.user_override
    }
}

/// Smart-device configuration read atomically at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Light brightness setpoint, 0-100
    pub light_brightness: u8,
    /// HVAC setpoint in °C
    pub hvac_setpoint: f32,
    /// HVAC fan speed setpoint, 0-100
    pub hvac_fan_speed: u8,
    /// Blinds position, 0-100 (0 = closed)
    pub blinds_position: u8,
    /// Devices under manual override
    pub user_override: UserOverride,
}

/// Mid-range setpoints with no override: brightness 50, 22.0 °C, fan 50,
/// blinds half open.
impl Default for DeviceState {
    fn default() -> Self {
        DeviceState {
            light_brightness: 50,
            hvac_setpoint: 22.0,
            hvac_fan_speed: 50,
            blinds_position: 50,
            user_override: UserOverride::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::SensorValue;

    #[test]
    fn test_compose_defaults_unavailable_to_zero() {
        let sensors = SensorSnapshot {
            light: SensorValue::Measured(123.5),
            sound: SensorValue::Unavailable,
            temperature: SensorValue::Measured(21.3),
            humidity: SensorValue::Unavailable,
            co2: SensorValue::Unavailable,
        };
        let reading = Reading::compose(&sensors, &DeviceState::default());

        assert_eq!(reading.light, 123.5);
        assert_eq!(reading.sound, 0.0);
        assert_eq!(reading.temperature, 21.3);
        assert_eq!(reading.humidity, 0.0);
        assert_eq!(reading.co2, 0);
        assert_eq!(reading.light_brightness, 50);
        assert_eq!(reading.hvac_setpoint, 22.0);
        assert_eq!(reading.device_state(), DeviceState::default());
    }

    #[test]
    fn test_bitwise_eq_handles_nan() {
        let a = Reading {
            light: f32::NAN,
            ..Reading::default()
        };
        let b = a;
        assert_ne!(a, b);
        assert!(a.bitwise_eq(&b));

        let c = Reading {
            light: -0.0,
            ..Reading::default()
        };
        assert_eq!(c, Reading::default());
        assert!(!c.bitwise_eq(&Reading::default()));
    }
}
