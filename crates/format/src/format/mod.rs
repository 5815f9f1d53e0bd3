//! On-disk byte formats for AEL logs.
//!
//! This module centralizes all serialization logic. The codec is pure and
//! stateless; file management lives in [`crate::log`].
//!
//! # Module Structure
//!
//! - `header`: 64-byte file header
//! - `block`: 42-byte data block (header + content)
//!
//! # File Layout
//!
//! ```text
//! ┌────────────────────────────────────┐
//! │ File Header (64 bytes)             │
//! ├────────────────────────────────────┤
//! │ Block 1 (42 bytes)                 │
//! ├────────────────────────────────────┤
//! │ Block 2 (42 bytes)                 │
//! ├────────────────────────────────────┤
//! │ ...                                │
//! └────────────────────────────────────┘
//! ```

pub mod block;
pub mod header;

pub use block::{
    decode_block, encode_block, BlockHeader, DecodedBlock, BLOCK_CONTENT_SIZE, BLOCK_HEADER_SIZE,
    BLOCK_LENGTH, BLOCK_SIZE,
};
pub use header::{
    decode_header, encode_header, FileHeader, AEL_MAGIC, AEL_VERSION, FILE_HEADER_SIZE,
    HEADER_RESERVED_SIZE,
};
