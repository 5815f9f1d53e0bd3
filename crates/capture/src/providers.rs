//! Stock sensor and device-state providers.
//!
//! None of these talk to hardware. [`SimulatedSensors`] produces a seeded
//! random walk for demos, [`NoSensors`] models a board with nothing wired up,
//! and [`ScriptedSensors`] replays fixed snapshots for tests. Hardware
//! providers can reuse [`scale_sound_adc`] and the MH-Z19 frame helpers.

use ael_core::{DeviceState, DeviceStateProvider, SensorProvider, SensorSnapshot, SensorValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scale a raw 16-bit ADC sample onto 0-100.
///
/// This is a loudness indication, not a calibrated dB value.
pub fn scale_sound_adc(raw: u16) -> f32 {
    f32::from(raw) / 65535.0 * 100.0
}

/// Command frame that asks an MH-Z19 sensor for its CO2 reading.
pub fn mhz19_read_command() -> [u8; 9] {
    [0xFF, 0x01, 0x86, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79]
}

/// Extract the ppm value from an MH-Z19 response frame.
///
/// A frame is valid when it is 9 bytes long and starts `0xFF 0x86`;
/// anything else is a failed read.
pub fn parse_mhz19_response(frame: &[u8]) -> SensorValue<u16> {
    match frame {
        [0xFF, 0x86, high, low, _, _, _, _, _] => {
            SensorValue::Measured(u16::from_be_bytes([*high, *low]))
        }
        _ => SensorValue::Unavailable,
    }
}

/// Device provider returning the same state on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDeviceState(pub DeviceState);

impl DeviceStateProvider for FixedDeviceState {
    fn snapshot(&mut self) -> DeviceState {
        self.0
    }
}

/// Sensor provider with every sensor absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSensors;

impl SensorProvider for NoSensors {
    fn read_light(&mut self) -> SensorValue<f32> {
        SensorValue::Unavailable
    }

    fn read_sound(&mut self) -> SensorValue<f32> {
        SensorValue::Unavailable
    }

    fn read_temperature(&mut self) -> SensorValue<f32> {
        SensorValue::Unavailable
    }

    fn read_humidity(&mut self) -> SensorValue<f32> {
        SensorValue::Unavailable
    }

    fn read_co2(&mut self) -> SensorValue<u16> {
        SensorValue::Unavailable
    }
}

/// Random-walk indoor climate.
///
/// Each read nudges the previous value by a small step and clamps it to a
/// plausible indoor range. The same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimulatedSensors {
    rng: StdRng,
    light: f32,
    temperature: f32,
    humidity: f32,
    co2: u16,
}

impl SimulatedSensors {
    /// Simulation seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        SimulatedSensors {
            rng: StdRng::seed_from_u64(seed),
            light: 300.0,
            temperature: 21.0,
            humidity: 45.0,
            co2: 450,
        }
    }

    /// Simulation seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::seeded(rand::thread_rng().gen())
    }

    fn walk(&mut self, current: f32, step: f32, min: f32, max: f32) -> f32 {
        (current + self.rng.gen_range(-step..=step)).clamp(min, max)
    }
}

impl SensorProvider for SimulatedSensors {
    fn read_light(&mut self) -> SensorValue<f32> {
        self.light = self.walk(self.light, 25.0, 0.0, 2_000.0);
        SensorValue::Measured(self.light)
    }

    fn read_sound(&mut self) -> SensorValue<f32> {
        let raw: u16 = self.rng.gen_range(4_000..=24_000);
        SensorValue::Measured(scale_sound_adc(raw))
    }

    fn read_temperature(&mut self) -> SensorValue<f32> {
        self.temperature = self.walk(self.temperature, 0.2, 15.0, 30.0);
        SensorValue::Measured(self.temperature)
    }

    fn read_humidity(&mut self) -> SensorValue<f32> {
        self.humidity = self.walk(self.humidity, 0.5, 20.0, 80.0);
        SensorValue::Measured(self.humidity)
    }

    fn read_co2(&mut self) -> SensorValue<u16> {
        let step: i32 = self.rng.gen_range(-15..=15);
        self.co2 = (i32::from(self.co2) + step).clamp(400, 2_000) as u16;
        SensorValue::Measured(self.co2)
    }
}

/// Replays a fixed list of snapshots, one per [`SensorProvider::sample`].
///
/// Individual `read_*` calls report the field of the snapshot that the next
/// `sample` would return. Once the script runs out every field is
/// unavailable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSensors {
    script: Vec<SensorSnapshot>,
    cursor: usize,
}

impl ScriptedSensors {
    /// Provider replaying `script` in order.
    pub fn new(script: Vec<SensorSnapshot>) -> Self {
        ScriptedSensors { script, cursor: 0 }
    }

    /// Provider returning `snapshot` `times` times.
    pub fn repeat(snapshot: SensorSnapshot, times: usize) -> Self {
        Self::new(vec![snapshot; times])
    }

    /// Snapshots not yet sampled.
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }

    fn current(&self) -> SensorSnapshot {
        self.script
            .get(self.cursor)
            .copied()
            .unwrap_or(SensorSnapshot::UNAVAILABLE)
    }
}

impl SensorProvider for ScriptedSensors {
    fn read_light(&mut self) -> SensorValue<f32> {
        self.current().light
    }

    fn read_sound(&mut self) -> SensorValue<f32> {
        self.current().sound
    }

    fn read_temperature(&mut self) -> SensorValue<f32> {
        self.current().temperature
    }

    fn read_humidity(&mut self) -> SensorValue<f32> {
        self.current().humidity
    }

    fn read_co2(&mut self) -> SensorValue<u16> {
        self.current().co2
    }

    fn sample(&mut self) -> SensorSnapshot {
        let snapshot = self.current();
        self.cursor = self.cursor.saturating_add(1);
        snapshot
    }
}
