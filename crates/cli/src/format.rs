//! Log contents → human/json string formatting.
//!
//! Two modes:
//! - **Human** (default): labelled fields with units, one section per snapshot
//! - **JSON** (`--json`): one compact JSON object per line

use std::fmt::Display;
use std::path::Path;

use ael_capture::CaptureReport;
use ael_format::{DecodedBlock, FileHeader, ReadStopReason, AEL_MAGIC};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Format the file header.
pub fn format_header(header: &FileHeader, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "magic": magic_text(),
            "version": header.version,
            "created_at": header.created_at_unix_seconds,
            "created_at_utc": format_unix_seconds(header.created_at_unix_seconds),
        })
        .to_string(),
        OutputMode::Human => format!(
            "--- AEL Log Header ---\n\
             Magic Number: {}\n\
             Version: {}\n\
             Creation Time: {}\n\
             {}",
            magic_text(),
            header.version,
            format_unix_seconds(header.created_at_unix_seconds),
            "-".repeat(30)
        ),
    }
}

/// Format one snapshot; `number` counts from 1.
pub fn format_block(number: u64, block: &DecodedBlock, mode: OutputMode) -> String {
    let r = &block.reading;
    match mode {
        OutputMode::Json => match serde_json::to_value(block) {
            Ok(Value::Object(mut fields)) => {
                fields.insert("snapshot".to_string(), json!(number));
                fields.insert("overrides".to_string(), json!(r.user_override.to_string()));
                Value::Object(fields).to_string()
            }
            Ok(other) => other.to_string(),
            Err(e) => format_error(&e, mode),
        },
        OutputMode::Human => {
            let mut out = format!(
                "\n--- Snapshot {} ---\n\
                 Timestamp: {}\n  \
                 Light: {:.2} Lux\n  \
                 Sound: {:.2} / 100\n  \
                 Temp: {:.2} °C\n  \
                 Humidity: {:.2} %\n  \
                 CO2: {} PPM\n  \
                 Light Brightness: {}%\n  \
                 HVAC Setpoint: {:.1} °C\n  \
                 HVAC Fan Speed: {}%\n  \
                 Blinds Position: {}% open\n  \
                 User Override: {}",
                number,
                format_unix_millis(block.timestamp_ms),
                r.light,
                r.sound,
                r.temperature,
                r.humidity,
                r.co2,
                r.light_brightness,
                r.hvac_setpoint,
                r.hvac_fan_speed,
                r.blinds_position,
                r.user_override,
            );
            if block.flags != u16::from(r.user_override.bits()) {
                out.push_str(&format!("\n  Flags: 0x{:04x}", block.flags));
            }
            out
        }
    }
}

/// Format the closing line of `ael view`.
pub fn format_view_summary(
    path: &Path,
    snapshots: u64,
    stop: Option<&ReadStopReason>,
    timestamp_regressions: u64,
    mode: OutputMode,
) -> String {
    let torn_bytes = match stop {
        Some(ReadStopReason::TornTail { trailing_bytes, .. }) => *trailing_bytes,
        _ => 0,
    };
    match mode {
        OutputMode::Json => json!({
            "path": path.display().to_string(),
            "snapshots": snapshots,
            "torn_bytes": torn_bytes,
            "timestamp_regressions": timestamp_regressions,
        })
        .to_string(),
        OutputMode::Human => {
            let mut out = String::new();
            if torn_bytes > 0 {
                out.push_str(&format!(
                    "\nWarning: ignored {} trailing bytes of an incomplete snapshot.",
                    torn_bytes
                ));
            }
            if timestamp_regressions > 0 {
                out.push_str(&format!(
                    "\nWarning: {} snapshot(s) older than the one before.",
                    timestamp_regressions
                ));
            }
            out.push_str(&format!(
                "\nSuccessfully read {} snapshots from '{}'.",
                snapshots,
                path.display()
            ));
            out
        }
    }
}

/// Format the result of `ael capture`.
pub fn format_capture_report(path: &Path, report: &CaptureReport, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({
            "path": path.display().to_string(),
            "snapshots_written": report.snapshots_written,
            "unavailable_readings": report.unavailable_readings,
            "first_timestamp_ms": report.first_timestamp_ms,
            "last_timestamp_ms": report.last_timestamp_ms,
        })
        .to_string(),
        OutputMode::Human => {
            let mut out = format!(
                "Successfully wrote {} snapshots to '{}'.",
                report.snapshots_written,
                path.display()
            );
            if report.unavailable_readings > 0 {
                out.push_str(&format!(
                    "\n{} sensor reading(s) were unavailable and recorded as 0.",
                    report.unavailable_readings
                ));
            }
            out
        }
    }
}

/// Format an error.
pub fn format_error(err: &dyn Display, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({ "error": err.to_string() }).to_string(),
        OutputMode::Human => format!("Error: {}", err),
    }
}

fn magic_text() -> String {
    String::from_utf8_lossy(&AEL_MAGIC)
        .trim_end_matches('\0')
        .to_string()
}

/// Render epoch seconds as UTC, or the raw number when out of range.
fn format_unix_seconds(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{} s since epoch", secs))
}

/// Render epoch milliseconds as UTC, or the raw number when out of range.
fn format_unix_millis(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string())
        .unwrap_or_else(|| format!("{} ms since epoch", ms))
}
