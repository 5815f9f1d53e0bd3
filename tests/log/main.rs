//! Integration tests for whole AEL files.
//!
//! These tests go through the public facade only: capture to a real file,
//! damage it the way a crash or a foreign writer would, and read it back.

#[path = "../common/mod.rs"]
mod common;

mod recovery;
mod scenario;
