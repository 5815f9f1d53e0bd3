//! Collaborator traits for data acquisition
//!
//! The capture loop never touches hardware directly. It is handed a
//! [`SensorProvider`] and a [`DeviceStateProvider`], so hardware-backed,
//! simulated and scripted sources are interchangeable.

use crate::sensor::{SensorSnapshot, SensorValue};
use crate::types::DeviceState;

/// Source of ambient measurements.
///
/// Every method is infallible at this boundary: a failing or missing sensor
/// reports [`SensorValue::Unavailable`]. Implementations own their bus
/// handles and release them on drop.
pub trait SensorProvider {
    /// Ambient light in lux
    fn read_light(&mut self) -> SensorValue<f32>;

    /// Sound level, 0-100 scaled
    fn read_sound(&mut self) -> SensorValue<f32>;

    /// Air temperature in °C
    fn read_temperature(&mut self) -> SensorValue<f32>;

    /// Relative humidity in %
    fn read_humidity(&mut self) -> SensorValue<f32>;

    /// CO2 concentration in ppm
    fn read_co2(&mut self) -> SensorValue<u16>;

    /// Read every sensor once, in wire order.
    fn sample(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            light: self.read_light(),
            sound: self.read_sound(),
            temperature: self.read_temperature(),
            humidity: self.read_humidity(),
            co2: self.read_co2(),
        }
    }
}

/// Source of smart-device configuration.
pub trait DeviceStateProvider {
    /// Single atomic read of the current device configuration.
    fn snapshot(&mut self) -> DeviceState;
}

impl<T: SensorProvider + ?Sized> SensorProvider for &mut T {
    fn read_light(&mut self) -> SensorValue<f32> {
        (**self).read_light()
    }

    fn read_sound(&mut self) -> SensorValue<f32> {
        (**self).read_sound()
    }

    fn read_temperature(&mut self) -> SensorValue<f32> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> SensorValue<f32> {
        (**self).read_humidity()
    }

    fn read_co2(&mut self) -> SensorValue<u16> {
        (**self).read_co2()
    }

    fn sample(&mut self) -> SensorSnapshot {
        (**self).sample()
    }
}

impl<T: SensorProvider + ?Sized> SensorProvider for Box<T> {
    fn read_light(&mut self) -> SensorValue<f32> {
        (**self).read_light()
    }

    fn read_sound(&mut self) -> SensorValue<f32> {
        (**self).read_sound()
    }

    fn read_temperature(&mut self) -> SensorValue<f32> {
        (**self).read_temperature()
    }

    fn read_humidity(&mut self) -> SensorValue<f32> {
        (**self).read_humidity()
    }

    fn read_co2(&mut self) -> SensorValue<u16> {
        (**self).read_co2()
    }

    fn sample(&mut self) -> SensorSnapshot {
        (**self).sample()
    }
}

impl<T: DeviceStateProvider + ?Sized> DeviceStateProvider for &mut T {
    fn snapshot(&mut self) -> DeviceState {
        (**self).snapshot()
    }
}

impl<T: DeviceStateProvider + ?Sized> DeviceStateProvider for Box<T> {
    fn snapshot(&mut self) -> DeviceState {
        (**self).snapshot()
    }
}
