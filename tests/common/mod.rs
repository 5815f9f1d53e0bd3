//! Shared test utilities for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use ael::{
    CaptureConfig, CaptureLoop, FixedDeviceState, ManualClock, OpenMode, Reading, ScriptedSensors,
    SensorSnapshot, SensorValue, UserOverride, WriterConfig,
};
use tempfile::TempDir;

/// Temp directory plus a log path inside it.
pub struct TestLog {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestLog {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(name);
        TestLog { dir, path }
    }
}

/// The fixed sensor sample used by the reference scenario.
pub fn reference_snapshot() -> SensorSnapshot {
    SensorSnapshot {
        light: SensorValue::Measured(123.5),
        sound: SensorValue::Measured(10.0),
        temperature: SensorValue::Measured(21.3),
        humidity: SensorValue::Measured(45.0),
        co2: SensorValue::Measured(410),
    }
}

/// The block content the reference scenario writes.
pub fn reference_reading() -> Reading {
    Reading {
        light: 123.5,
        sound: 10.0,
        temperature: 21.3,
        humidity: 45.0,
        co2: 410,
        light_brightness: 50,
        hvac_setpoint: 22.0,
        hvac_fan_speed: 50,
        blinds_position: 50,
        user_override: UserOverride::NONE,
    }
}

/// Capture `count` reference snapshots starting at `start_ms`, 2s apart.
pub fn capture_reference(path: &Path, mode: OpenMode, start_ms: u64, count: u64) {
    let clock = ManualClock::starting_at(start_ms);
    let mut session = CaptureLoop::with_clock(
        ScriptedSensors::repeat(reference_snapshot(), count as usize),
        FixedDeviceState::default(),
        &clock,
        CaptureConfig::new()
            .with_snapshots(count)
            .with_interval(std::time::Duration::from_millis(2_000)),
    )
    .expect("valid config");
    ael::capture_to_path(path, mode, &mut session, WriterConfig::for_testing())
        .expect("capture");
}

/// Append raw bytes to the end of a file.
pub fn append_bytes(path: &Path, bytes: &[u8]) {
    let mut file = OpenOptions::new().append(true).open(path).expect("open");
    file.write_all(bytes).expect("append");
}

/// Overwrite bytes in place.
pub fn overwrite_at(path: &Path, offset: u64, bytes: &[u8]) {
    let mut file = OpenOptions::new().write(true).open(path).expect("open");
    file.seek(SeekFrom::Start(offset)).expect("seek");
    file.write_all(bytes).expect("write");
}
