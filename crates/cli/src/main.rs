//! `ael`: capture and view Ambient Environment Logs.
//!
//! - `ael capture [-o PATH] [-n COUNT] [--interval-ms MS]` records snapshots
//! - `ael view [PATH]` prints a log back, streaming one snapshot at a time
//!
//! Logs go to stderr (`-v`/`-q`, or `RUST_LOG`); results go to stdout.

mod commands;
mod format;
mod parse;

use std::path::Path;
use std::process;

use ael_capture::{
    capture_to_path, CaptureConfig, CaptureLoop, FixedDeviceState, NoSensors, OpenMode,
    SimulatedSensors,
};
use ael_core::{DeviceState, SensorProvider};
use ael_format::{LogReader, WriterConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{
    format_block, format_capture_report, format_error, format_header, format_view_summary,
    OutputMode,
};
use parse::{log_directive, matches_to_action, output_mode, CliAction, SensorSource};

fn main() {
    let matches = build_cli().get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_directive(&matches))),
        )
        .with_writer(std::io::stderr)
        .init();

    let mode = output_mode(&matches);
    let exit_code = match matches_to_action(&matches) {
        Ok(CliAction::Capture {
            output,
            mode: open_mode,
            capture,
            writer,
            source,
        }) => run_capture(&output, open_mode, capture, writer, source, mode),
        Ok(CliAction::View { path }) => run_view(&path, mode),
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            2
        }
    };
    process::exit(exit_code);
}

fn run_capture(
    output: &Path,
    open_mode: OpenMode,
    capture: CaptureConfig,
    writer: WriterConfig,
    source: SensorSource,
    mode: OutputMode,
) -> i32 {
    let sensors: Box<dyn SensorProvider> = match source {
        SensorSource::Simulated { seed: Some(seed) } => Box::new(SimulatedSensors::seeded(seed)),
        SensorSource::Simulated { seed: None } => Box::new(SimulatedSensors::from_entropy()),
        SensorSource::Unavailable => Box::new(NoSensors),
    };
    let devices = FixedDeviceState(DeviceState::default());

    info!(
        path = %output.display(),
        resume = open_mode == OpenMode::Resume,
        snapshots = capture.snapshots,
        "Starting capture"
    );

    let result = CaptureLoop::new(sensors, devices, capture)
        .and_then(|mut session| capture_to_path(output, open_mode, &mut session, writer));

    match result {
        Ok(report) => {
            println!("{}", format_capture_report(output, &report, mode));
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}

fn run_view(path: &Path, mode: OutputMode) -> i32 {
    debug!(path = %path.display(), "Opening log");
    let mut reader = match LogReader::open_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            return 1;
        }
    };

    println!("{}", format_header(reader.header(), mode));

    let mut count = 0u64;
    for result in reader.records() {
        match result {
            Ok(block) => {
                count += 1;
                println!("{}", format_block(count, &block, mode));
            }
            Err(e) => {
                eprintln!("{}", format_error(&e, mode));
                eprintln!("Stopped after {} snapshots.", count);
                return 1;
            }
        }
    }

    println!(
        "{}",
        format_view_summary(
            path,
            count,
            reader.stop_reason(),
            reader.timestamp_regressions(),
            mode
        )
    );
    0
}
