//! ArgMatches → CliAction conversion.
//!
//! Maps clap's parsed arguments onto the library configuration types so
//! `main` only dispatches.

use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;

use ael_capture::{CaptureConfig, OpenMode};
use ael_format::{SyncMode, WriterConfig};

use crate::format::OutputMode;

/// Where capture readings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSource {
    /// Seeded random walk; a missing seed means OS entropy
    Simulated { seed: Option<u64> },
    /// Every sensor unavailable
    Unavailable,
}

/// The result of parsing the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    /// Record a capture session.
    Capture {
        output: PathBuf,
        mode: OpenMode,
        capture: CaptureConfig,
        writer: WriterConfig,
        source: SensorSource,
    },
    /// Print a log file.
    View { path: PathBuf },
}

/// Log verbosity requested with `-v` / `-q`.
pub fn log_directive(matches: &ArgMatches) -> &'static str {
    if matches.get_flag("quiet") {
        return "error";
    }
    match matches.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Output mode requested with `--json`.
pub fn output_mode(matches: &ArgMatches) -> OutputMode {
    if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    }
}

/// Convert top-level matches into an action.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    match matches.subcommand() {
        Some(("capture", sub)) => parse_capture(sub),
        Some(("view", sub)) => Ok(CliAction::View {
            path: required_path(sub, "path")?,
        }),
        Some((other, _)) => Err(format!("unknown command '{}'", other)),
        None => Err("no command given".to_string()),
    }
}

fn parse_capture(sub: &ArgMatches) -> Result<CliAction, String> {
    let snapshots = sub.get_one::<u64>("count").copied().unwrap_or(10);
    let interval_ms = sub.get_one::<u64>("interval-ms").copied().unwrap_or(2_000);
    let capture = CaptureConfig::new()
        .with_snapshots(snapshots)
        .with_interval(Duration::from_millis(interval_ms));
    capture.validate().map_err(|e| e.to_string())?;

    let sync_name = sub
        .get_one::<String>("sync")
        .map(String::as_str)
        .unwrap_or("on-close");
    let sync = SyncMode::from_name(sync_name)
        .ok_or_else(|| format!("unknown sync mode '{}'", sync_name))?;

    let mode = if sub.get_flag("resume") {
        OpenMode::Resume
    } else {
        OpenMode::Create
    };

    let source = if sub.get_flag("no-sensors") {
        SensorSource::Unavailable
    } else {
        SensorSource::Simulated {
            seed: sub.get_one::<u64>("seed").copied(),
        }
    };

    Ok(CliAction::Capture {
        output: required_path(sub, "output")?,
        mode,
        capture,
        writer: WriterConfig::new().with_sync(sync),
        source,
    })
}

fn required_path(sub: &ArgMatches, id: &str) -> Result<PathBuf, String> {
    sub.get_one::<String>(id)
        .map(PathBuf::from)
        .ok_or_else(|| format!("missing {}", id))
}
