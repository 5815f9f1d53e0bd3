//! End-to-end capture sessions against real files.

use ael_capture::{
    capture_to_path, CaptureConfig, CaptureLoop, FixedDeviceState, ManualClock, NoSensors,
    OpenMode, ScriptedSensors, SimulatedSensors,
};
use ael_core::{DeviceState, SensorSnapshot, SensorValue, UserOverride};
use ael_format::{read_all, ReadStopReason, WriterConfig};
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;
use tempfile::TempDir;

fn config(snapshots: u64) -> CaptureConfig {
    CaptureConfig::new()
        .with_snapshots(snapshots)
        .with_interval(Duration::from_millis(2_000))
}

#[test]
fn test_create_then_read_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("environment_log.ael");

    let snapshot = SensorSnapshot {
        light: SensorValue::Measured(123.5),
        sound: SensorValue::Measured(10.0),
        temperature: SensorValue::Measured(21.3),
        humidity: SensorValue::Measured(45.0),
        co2: SensorValue::Measured(410),
    };
    let clock = ManualClock::starting_at(1_000);
    let mut capture = CaptureLoop::with_clock(
        ScriptedSensors::repeat(snapshot, 3),
        FixedDeviceState::default(),
        &clock,
        config(3),
    )
    .unwrap();

    let report = capture_to_path(
        &path,
        OpenMode::Create,
        &mut capture,
        WriterConfig::for_testing(),
    )
    .unwrap();
    assert_eq!(report.snapshots_written, 3);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 190);

    let result = read_all(&path).unwrap();
    assert_eq!(result.header.created_at_unix_seconds, 1_700_000_000);
    assert_eq!(result.stop_reason, ReadStopReason::EndOfData);
    let timestamps: Vec<u64> = result.blocks.iter().map(|b| b.timestamp_ms).collect();
    assert_eq!(timestamps, vec![1_000, 3_000, 5_000]);
    for block in &result.blocks {
        assert_eq!(block.reading.light, 123.5);
        assert_eq!(block.reading.co2, 410);
        assert_eq!(block.reading.device_state(), DeviceState::default());
        assert_eq!(block.flags, 0);
    }
}

#[test]
fn test_resume_extends_existing_log() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resume.ael");
    let clock = ManualClock::starting_at(10_000);

    let mut first = CaptureLoop::with_clock(
        SimulatedSensors::seeded(1),
        FixedDeviceState::default(),
        &clock,
        config(2),
    )
    .unwrap();
    capture_to_path(&path, OpenMode::Create, &mut first, WriterConfig::for_testing()).unwrap();

    // Simulate a crash mid-append
    {
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(&[0x2A; 17]).unwrap();
    }

    clock.advance(Duration::from_secs(60));
    let devices = FixedDeviceState(DeviceState {
        user_override: UserOverride::HVAC,
        ..DeviceState::default()
    });
    let mut second =
        CaptureLoop::with_clock(SimulatedSensors::seeded(2), devices, &clock, config(2)).unwrap();
    capture_to_path(&path, OpenMode::Resume, &mut second, WriterConfig::new()).unwrap();

    let result = read_all(&path).unwrap();
    assert_eq!(result.blocks.len(), 4);
    assert_eq!(result.torn_bytes(), 0);
    assert_eq!(result.timestamp_regressions, 0);
    assert_eq!(result.blocks[1].reading.user_override, UserOverride::NONE);
    assert_eq!(result.blocks[2].reading.user_override, UserOverride::HVAC);
    assert_eq!(result.blocks[2].flags, u16::from(UserOverride::HVAC.bits()));
}

#[test]
fn test_resume_of_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.ael");

    let mut capture = CaptureLoop::with_clock(
        NoSensors,
        FixedDeviceState::default(),
        ManualClock::starting_at(0),
        config(1),
    )
    .unwrap();
    let result = capture_to_path(&path, OpenMode::Resume, &mut capture, WriterConfig::new());

    assert!(result.is_err());
    assert!(!path.exists());
}
