//! The reference capture scenario, checked byte for byte.

use crate::common::*;
use ael::{read_all, OpenMode, ReadStopReason, AEL_MAGIC, BLOCK_SIZE, FILE_HEADER_SIZE};

#[test]
fn three_snapshots_make_a_190_byte_file() {
    let log = TestLog::new("environment_log.ael");
    capture_reference(&log.path, OpenMode::Create, 1_000, 3);

    let bytes = std::fs::read(&log.path).unwrap();
    assert_eq!(bytes.len(), 190);
    assert_eq!(bytes.len(), FILE_HEADER_SIZE + 3 * BLOCK_SIZE);
    assert_eq!(&bytes[..8], &AEL_MAGIC);
    assert_eq!(&bytes[8..10], &[0x01, 0x00]);
    assert!(bytes[18..64].iter().all(|b| *b == 0));

    for (i, expected_ts) in [1_000u64, 3_000, 5_000].iter().enumerate() {
        let block = &bytes[FILE_HEADER_SIZE + i * BLOCK_SIZE..][..BLOCK_SIZE];
        assert_eq!(&block[0..4], &42u32.to_le_bytes());
        assert_eq!(&block[4..12], &expected_ts.to_le_bytes());
        assert_eq!(&block[12..16], &[0, 0, 0, 0]);
        assert_eq!(&block[16..20], &123.5f32.to_le_bytes());
        assert_eq!(&block[32..34], &410u16.to_le_bytes());
        assert_eq!(block[34], 50);
        assert_eq!(&block[35..39], &22.0f32.to_le_bytes());
        assert_eq!(&block[39..42], &[50, 50, 0]);
    }
}

#[test]
fn reference_scenario_reads_back_exactly() {
    let log = TestLog::new("environment_log.ael");
    capture_reference(&log.path, OpenMode::Create, 1_000, 3);

    let result = read_all(&log.path).unwrap();
    assert_eq!(result.header.version, 1);
    assert_eq!(result.stop_reason, ReadStopReason::EndOfData);
    assert_eq!(result.valid_end, 190);
    assert_eq!(result.blocks.len(), 3);

    let expected = reference_reading();
    let timestamps: Vec<u64> = result.blocks.iter().map(|b| b.timestamp_ms).collect();
    assert_eq!(timestamps, vec![1_000, 3_000, 5_000]);
    for block in &result.blocks {
        assert!(block.reading.bitwise_eq(&expected));
        assert_eq!(block.flags, 0);
    }
}
