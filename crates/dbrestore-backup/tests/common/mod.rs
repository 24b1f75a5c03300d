//! Common test utilities for dbrestore-backup
//!
//! - A recording in-memory provider for asserting call order
//! - SQLite fixtures for end-to-end dump/restore runs

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
