//! AEL data block format.
//!
//! # Block Layout (42 bytes, little-endian)
//!
//! ```text
//! Block header (16 bytes):
//! ┌─────────────────┬──────────────────┬───────────┬──────────────┐
//! │ Length (4) = 42 │ Timestamp ms (8) │ Flags (2) │ Reserved (2) │
//! └─────────────────┴──────────────────┴───────────┴──────────────┘
//!
//! Block content (26 bytes):
//! ┌───────────┬───────────┬──────────┬──────────────┬─────────┐
//! │ Light f32 │ Sound f32 │ Temp f32 │ Humidity f32 │ CO2 u16 │
//! ├───────────┴──┬────────┴──────────┴───┬──────────┴───┬─────┴───────────┬─────────────┐
//! │ Brightness u8│ HVAC setpoint f32     │ Fan speed u8 │ Blinds pos u8   │ Override u8 │
//! └──────────────┴───────────────────────┴──────────────┴─────────────────┴─────────────┘
//! ```
//!
//! Every block in a version-1 file has the same size. The length field is
//! redundant but checked: a mismatch means corruption or an unsupported
//! block variant, and decoding stops rather than guessing a resync point.

use ael_core::{BlockDefect, Reading, Result, UserOverride};
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

/// Size of the block header in bytes
pub const BLOCK_HEADER_SIZE: usize = 16;

/// Size of the block content in bytes
pub const BLOCK_CONTENT_SIZE: usize = 4 + 4 + 4 + 4 + 2 + 1 + 4 + 1 + 1 + 1;

/// Total size of a fixed-size block
pub const BLOCK_SIZE: usize = BLOCK_HEADER_SIZE + BLOCK_CONTENT_SIZE;

/// Value of the length field in every version-1 block
pub const BLOCK_LENGTH: u32 = BLOCK_SIZE as u32;

/// Block header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Total block length (header + content)
    pub block_length: u32,

    /// Capture time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,

    /// Block flags (mirrors the user-override byte)
    pub flags: u16,

    /// Reserved, zero on write
    pub reserved: u16,
}

impl BlockHeader {
    /// Parse the first [`BLOCK_HEADER_SIZE`] bytes without validation.
    ///
    /// Caller guarantees `bytes.len() >= BLOCK_HEADER_SIZE`.
    fn parse(bytes: &[u8]) -> Self {
        BlockHeader {
            block_length: LittleEndian::read_u32(&bytes[0..4]),
            timestamp_ms: LittleEndian::read_u64(&bytes[4..12]),
            flags: LittleEndian::read_u16(&bytes[12..14]),
            reserved: LittleEndian::read_u16(&bytes[14..16]),
        }
    }
}

/// One decoded snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecodedBlock {
    /// Capture time, milliseconds since the Unix epoch
    pub timestamp_ms: u64,

    /// Block flags
    pub flags: u16,

    /// Snapshot content, serialized inline with the block fields
    #[serde(flatten)]
    pub reading: Reading,
}

impl DecodedBlock {
    /// Override set carried in the low byte of the block flags.
    pub fn flag_overrides(&self) -> UserOverride {
        UserOverride::from_bits((self.flags & 0x00FF) as u8)
    }
}

/// Encode one block.
///
/// Never fails: every field already has its wire width.
pub fn encode_block(timestamp_ms: u64, flags: u16, reading: &Reading) -> [u8; BLOCK_SIZE] {
    let mut buf = [0u8; BLOCK_SIZE];

    // Header; bytes 14..16 stay reserved
    LittleEndian::write_u32(&mut buf[0..4], BLOCK_LENGTH);
    LittleEndian::write_u64(&mut buf[4..12], timestamp_ms);
    LittleEndian::write_u16(&mut buf[12..14], flags);

    let content = &mut buf[BLOCK_HEADER_SIZE..];
    LittleEndian::write_f32(&mut content[0..4], reading.light);
    LittleEndian::write_f32(&mut content[4..8], reading.sound);
    LittleEndian::write_f32(&mut content[8..12], reading.temperature);
    LittleEndian::write_f32(&mut content[12..16], reading.humidity);
    LittleEndian::write_u16(&mut content[16..18], reading.co2);
    content[18] = reading.light_brightness;
    LittleEndian::write_f32(&mut content[19..23], reading.hvac_setpoint);
    content[23] = reading.hvac_fan_speed;
    content[24] = reading.blinds_position;
    content[25] = reading.user_override.bits();

    buf
}

/// Decode one block from the front of `bytes`.
///
/// Bytes past [`BLOCK_SIZE`] are ignored. Fails with `MalformedBlock` when
/// fewer than [`BLOCK_SIZE`] bytes are supplied or when the length field is
/// not [`BLOCK_LENGTH`].
pub fn decode_block(bytes: &[u8]) -> Result<DecodedBlock> {
    if bytes.len() < BLOCK_SIZE {
        return Err(BlockDefect::TooShort {
            len: bytes.len(),
            expected: BLOCK_SIZE,
        }
        .into());
    }

    let header = BlockHeader::parse(bytes);
    if header.block_length != BLOCK_LENGTH {
        return Err(BlockDefect::LengthMismatch {
            declared: header.block_length,
            expected: BLOCK_LENGTH,
        }
        .into());
    }

    let content = &bytes[BLOCK_HEADER_SIZE..BLOCK_SIZE];
    let reading = Reading {
        light: LittleEndian::read_f32(&content[0..4]),
        sound: LittleEndian::read_f32(&content[4..8]),
        temperature: LittleEndian::read_f32(&content[8..12]),
        humidity: LittleEndian::read_f32(&content[12..16]),
        co2: LittleEndian::read_u16(&content[16..18]),
        light_brightness: content[18],
        hvac_setpoint: LittleEndian::read_f32(&content[19..23]),
        hvac_fan_speed: content[23],
        blinds_position: content[24],
        user_override: UserOverride::from_bits(content[25]),
    };

    Ok(DecodedBlock {
        timestamp_ms: header.timestamp_ms,
        flags: header.flags,
        reading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ael_core::AelError;

    fn sample_reading() -> Reading {
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

    #[test]
    fn test_block_sizes() {
        assert_eq!(BLOCK_HEADER_SIZE, 16);
        assert_eq!(BLOCK_CONTENT_SIZE, 26);
        assert_eq!(BLOCK_SIZE, 42);
    }

    #[test]
    fn test_block_roundtrip() {
        let reading = sample_reading();
        let bytes = encode_block(1000, 0, &reading);
        let block = decode_block(&bytes).unwrap();

        assert_eq!(block.timestamp_ms, 1000);
        assert_eq!(block.flags, 0);
        assert!(block.reading.bitwise_eq(&reading));
    }

    #[test]
    fn test_block_layout() {
        let reading = Reading {
            co2: 0x0102,
            light_brightness: 0xAA,
            hvac_fan_speed: 0xBB,
            blinds_position: 0xCC,
            user_override: UserOverride::LIGHT | UserOverride::BLINDS,
            light: 1.0,
            hvac_setpoint: 2.0,
            ..Reading::default()
        };
        let bytes = encode_block(0x1122_3344_5566_7788, 0x0005, &reading);

        assert_eq!(&bytes[0..4], &[42, 0, 0, 0]);
        assert_eq!(
            &bytes[4..12],
            &[0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]
        );
        assert_eq!(&bytes[12..14], &[0x05, 0x00]);
        assert_eq!(&bytes[14..16], &[0x00, 0x00]);
        assert_eq!(&bytes[16..20], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[32..34], &[0x02, 0x01]);
        assert_eq!(bytes[34], 0xAA);
        assert_eq!(&bytes[35..39], &2.0f32.to_le_bytes());
        assert_eq!(bytes[39], 0xBB);
        assert_eq!(bytes[40], 0xCC);
        assert_eq!(bytes[41], 0x05);
    }

    #[test]
    fn test_decode_too_short() {
        let bytes = encode_block(1, 0, &sample_reading());
        let err = decode_block(&bytes[..41]).unwrap_err();
        assert!(matches!(
            err,
            AelError::MalformedBlock(BlockDefect::TooShort { len: 41, expected: 42 })
        ));
    }

    #[test]
    fn test_decode_length_mismatch() {
        let mut bytes = encode_block(1, 0, &sample_reading());
        LittleEndian::write_u32(&mut bytes[0..4], 58);
        let err = decode_block(&bytes).unwrap_err();
        assert!(matches!(
            err,
            AelError::MalformedBlock(BlockDefect::LengthMismatch { declared: 58, .. })
        ));
    }

    #[test]
    fn test_decode_ignores_trailing_bytes_and_reserved() {
        let mut bytes = encode_block(7, 3, &sample_reading()).to_vec();
        bytes[14] = 0xFF;
        bytes.extend_from_slice(&[0xEE; 10]);
        let block = decode_block(&bytes).unwrap();
        assert_eq!(block.timestamp_ms, 7);
        assert_eq!(block.flags, 3);
    }

    #[test]
    fn test_unknown_override_bits_survive() {
        let reading = Reading {
            user_override: UserOverride::from_bits(0xF2),
            ..sample_reading()
        };
        let block = decode_block(&encode_block(1, 0xF2, &reading)).unwrap();
        assert_eq!(block.reading.user_override.bits(), 0xF2);
        assert_eq!(block.flag_overrides().bits(), 0xF2);
    }

    #[test]
    fn test_nan_payload_preserved() {
        let reading = Reading {
            temperature: f32::from_bits(0x7FC0_1234),
            ..sample_reading()
        };
        let block = decode_block(&encode_block(1, 0, &reading)).unwrap();
        assert_eq!(block.reading.temperature.to_bits(), 0x7FC0_1234);
    }

    #[test]
    fn test_decoded_block_serializes_flat() {
        let block = decode_block(&encode_block(7, 2, &sample_reading())).unwrap();
        let value = serde_json::to_value(block).unwrap();

        assert_eq!(value["timestamp_ms"], 7);
        assert_eq!(value["flags"], 2);
        assert_eq!(value["co2"], 410);
        assert_eq!(value["user_override"], 0);
        assert!(value.get("reading").is_none());
    }
}
