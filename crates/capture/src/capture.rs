//! The capture loop
//!
//! One tick reads the clock, samples every sensor, takes one device-state
//! snapshot and appends a single block. Sensor gaps are logged and encoded
//! as zero; they never stop the session. Any log error ends the session
//! immediately and is returned to the caller without a retry.

use crate::clock::{Clock, SystemClock};
use crate::config::CaptureConfig;
use crate::error::CaptureError;
use ael_core::{DeviceStateProvider, Reading, SensorField, SensorProvider, SensorSnapshot};
use ael_format::{LogSink, LogWriter, WriterConfig};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info, warn};

/// One captured snapshot before it is encoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,
    /// Raw sensor sample including validity
    pub sensors: SensorSnapshot,
    /// Block content as written (unavailable fields zeroed)
    pub reading: Reading,
}

/// Summary of a finished capture session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureReport {
    /// Blocks appended during this session
    pub snapshots_written: u64,
    /// Sensor fields that fell back to zero, summed over all snapshots
    pub unavailable_readings: u64,
    /// Timestamp of the first block of this session
    pub first_timestamp_ms: Option<u64>,
    /// Timestamp of the last block of this session
    pub last_timestamp_ms: Option<u64>,
}

/// Whether [`capture_to_path`] starts a new file or continues an old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Create or truncate the file and write a fresh header
    #[default]
    Create,
    /// Validate an existing file and append after its last whole block
    Resume,
}

/// Periodic snapshot recorder.
pub struct CaptureLoop<S, D, C = SystemClock> {
    sensors: S,
    devices: D,
    clock: C,
    config: CaptureConfig,
    /// Validity mask of the previous snapshot
    last_validity: u8,
}

/// Every sensor measured.
const ALL_MEASURED: u8 = (1 << SensorField::ALL.len()) - 1;

impl<S: SensorProvider, D: DeviceStateProvider> CaptureLoop<S, D> {
    /// Capture loop on the system clock.
    pub fn new(sensors: S, devices: D, config: CaptureConfig) -> Result<Self, CaptureError> {
        Self::with_clock(sensors, devices, SystemClock, config)
    }
}

impl<S: SensorProvider, D: DeviceStateProvider, C: Clock> CaptureLoop<S, D, C> {
    /// Capture loop on an explicit clock.
    pub fn with_clock(
        sensors: S,
        devices: D,
        clock: C,
        config: CaptureConfig,
    ) -> Result<Self, CaptureError> {
        config.validate()?;
        Ok(CaptureLoop {
            sensors,
            devices,
            clock,
            config,
            last_validity: ALL_MEASURED,
        })
    }

    /// Take one snapshot without writing it.
    pub fn capture_one(&mut self) -> Snapshot {
        let timestamp_ms = self.clock.now_millis();
        let sensors = self.sensors.sample();
        let device = self.devices.snapshot();

        for field in self.newly_unavailable(&sensors) {
            warn!(field = field.name(), timestamp_ms, "Sensor unavailable, recording 0");
        }

        Snapshot {
            timestamp_ms,
            sensors,
            reading: Reading::compose(&sensors, &device),
        }
    }

    /// Fields missing now that were measured in the previous snapshot.
    ///
    /// An outage is warned about once, when it starts; recovery is logged
    /// at debug level.
    fn newly_unavailable(&mut self, sensors: &SensorSnapshot) -> Vec<SensorField> {
        let validity = sensors.validity_mask();
        let lost = self.last_validity & !validity;
        let recovered = validity & !self.last_validity;
        self.last_validity = validity;

        for (i, field) in SensorField::ALL.iter().enumerate() {
            if recovered & (1 << i) != 0 {
                debug!(field = field.name(), "Sensor available again");
            }
        }
        SensorField::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| lost & (1 << i) != 0)
            .map(|(_, field)| *field)
            .collect()
    }

    /// Record `config.snapshots` blocks into `writer`.
    ///
    /// Sleeps `config.interval` between snapshots, not after the last one.
    /// The writer is left open; closing it is the caller's job.
    pub fn run<W: LogSink>(
        &mut self,
        writer: &mut LogWriter<W>,
    ) -> Result<CaptureReport, CaptureError> {
        let total = self.config.snapshots;
        let mut report = CaptureReport::default();

        info!(
            snapshots = total,
            interval_ms = self.config.interval.as_millis() as u64,
            prior_blocks = writer.prior_blocks(),
            "Capture started"
        );

        for index in 0..total {
            let snapshot = self.capture_one();
            writer.append_reading(snapshot.timestamp_ms, &snapshot.reading)?;

            let missing = snapshot.sensors.unavailable_fields().count() as u64;
            report.snapshots_written += 1;
            report.unavailable_readings += missing;
            report
                .first_timestamp_ms
                .get_or_insert(snapshot.timestamp_ms);
            report.last_timestamp_ms = Some(snapshot.timestamp_ms);

            debug!(
                snapshot = index + 1,
                of = total,
                timestamp_ms = snapshot.timestamp_ms,
                unavailable = missing,
                "Snapshot captured"
            );

            if index + 1 < total {
                self.clock.sleep(self.config.interval);
            }
        }

        info!(
            snapshots = report.snapshots_written,
            unavailable_readings = report.unavailable_readings,
            total_blocks = writer.total_blocks(),
            "Capture finished"
        );
        Ok(report)
    }

    /// Session parameters.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Give back the providers and the clock.
    pub fn into_parts(self) -> (S, D, C) {
        (self.sensors, self.devices, self.clock)
    }
}

/// Run a full session against a file and close it.
///
/// With [`OpenMode::Create`] the file is replaced; with [`OpenMode::Resume`]
/// an existing log is validated and extended. The configuration is checked
/// before the file is touched.
pub fn capture_to_path<S, D, C>(
    path: &Path,
    mode: OpenMode,
    capture: &mut CaptureLoop<S, D, C>,
    writer_config: WriterConfig,
) -> Result<CaptureReport, CaptureError>
where
    S: SensorProvider,
    D: DeviceStateProvider,
    C: Clock,
{
    capture.config().validate()?;

    let mut writer: LogWriter<File> = match mode {
        OpenMode::Create => LogWriter::create(path, writer_config)?,
        OpenMode::Resume => LogWriter::resume(path, writer_config)?,
    };
    let report = capture.run(&mut writer)?;
    writer.close()?;
    Ok(report)
}
