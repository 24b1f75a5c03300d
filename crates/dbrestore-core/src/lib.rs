//! # dbrestore-core
//!
//! Core library for dbrestore providing:
//! - The dump data model (columns, per-table dumps, restore strategies)
//! - The value codec that round-trips column values through JSON
//! - The batch chunker used by the restore engine
//! - Connection profile storage

pub mod batch;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod types;
pub mod utils;

pub use config::{ConnectionSettings, Profile, ProfileStore, ProviderKind};
pub use error::{Error, Result};
pub use types::{Column, EncodedRow, RestoreStrategy, Row, TableDump, Value};
