//! Crash leftovers and damaged files, end to end.

use crate::common::*;
use ael::{
    read_all, AelError, BlockDefect, LogReader, OpenMode, ReadStopReason, BLOCK_SIZE,
    FILE_HEADER_SIZE,
};

#[test]
fn torn_tail_is_ignored_then_cut_on_resume() {
    let log = TestLog::new("crash.ael");
    capture_reference(&log.path, OpenMode::Create, 1_000, 3);
    append_bytes(&log.path, &[0xEE; 30]);

    let before = read_all(&log.path).unwrap();
    assert_eq!(before.blocks.len(), 3);
    assert_eq!(
        before.stop_reason,
        ReadStopReason::TornTail {
            offset: 190,
            trailing_bytes: 30
        }
    );

    capture_reference(&log.path, OpenMode::Resume, 60_000, 2);

    let after = read_all(&log.path).unwrap();
    assert_eq!(after.blocks.len(), 5);
    assert_eq!(after.stop_reason, ReadStopReason::EndOfData);
    assert_eq!(
        std::fs::metadata(&log.path).unwrap().len(),
        (FILE_HEADER_SIZE + 5 * BLOCK_SIZE) as u64
    );
    assert_eq!(after.blocks[3].timestamp_ms, 60_000);
}

#[test]
fn header_only_file_has_no_blocks() {
    let log = TestLog::new("empty.ael");
    capture_reference(&log.path, OpenMode::Create, 1_000, 1);
    std::fs::OpenOptions::new()
        .write(true)
        .open(&log.path)
        .unwrap()
        .set_len(FILE_HEADER_SIZE as u64)
        .unwrap();

    let result = read_all(&log.path).unwrap();
    assert!(result.blocks.is_empty());
    assert_eq!(result.stop_reason, ReadStopReason::EndOfData);
}

#[test]
fn malformed_block_fails_after_good_prefix() {
    let log = TestLog::new("bad_length.ael");
    capture_reference(&log.path, OpenMode::Create, 1_000, 3);
    overwrite_at(
        &log.path,
        (FILE_HEADER_SIZE + 2 * BLOCK_SIZE) as u64,
        &43u32.to_le_bytes(),
    );

    let mut reader = LogReader::open_path(&log.path).unwrap();
    let mut records = reader.records();
    assert!(records.next().unwrap().is_ok());
    assert!(records.next().unwrap().is_ok());
    assert!(matches!(
        records.next(),
        Some(Err(AelError::MalformedBlock(BlockDefect::LengthMismatch {
            declared: 43,
            expected: 42
        })))
    ));
    assert!(records.next().is_none());
}

#[test]
fn foreign_file_is_rejected() {
    let log = TestLog::new("notes.txt");
    std::fs::write(&log.path, b"these are not the bytes you are looking for, ok?").unwrap();

    assert!(matches!(
        read_all(&log.path),
        Err(AelError::BadMagic { .. })
    ));
}

#[test]
fn resume_refuses_a_foreign_file() {
    let log = TestLog::new("foreign.ael");
    let original = vec![0x55u8; 200];
    std::fs::write(&log.path, &original).unwrap();

    let clock = ael::ManualClock::starting_at(0);
    let mut session = ael::CaptureLoop::with_clock(
        ael::NoSensors,
        ael::FixedDeviceState::default(),
        &clock,
        ael::CaptureConfig::for_testing(),
    )
    .unwrap();
    let result = ael::capture_to_path(
        &log.path,
        OpenMode::Resume,
        &mut session,
        ael::WriterConfig::new(),
    );

    assert!(matches!(
        result,
        Err(ael::CaptureError::Log(AelError::BadMagic { .. }))
    ));
    assert_eq!(std::fs::read(&log.path).unwrap(), original);
}
