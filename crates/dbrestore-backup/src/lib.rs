//! Dump and restore engines for dbrestore.
//!
//! This crate provides:
//! - [`perform_dump`]: capture every user table into a dump directory
//! - [`perform_restore`]: reconcile a dump into a live database
//! - Dump directory helpers (manifest, completeness check, archiving)
//!
//! # Example
//!
//! ```no_run
//! use dbrestore_backup::{dump_exists, perform_dump};
//! use dbrestore_providers::SqliteProvider;
//! use std::path::Path;
//!
//! # async fn example() -> dbrestore_core::Result<()> {
//! let provider = SqliteProvider::open(Path::new("dev.db"))?;
//! let dir = Path::new("./db-backup");
//! if !dump_exists(dir) {
//!     let result = perform_dump(&provider, "sqlite", dir).await?;
//!     println!("{} rows dumped", result.total_rows);
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod dump;
pub mod files;
pub mod manifest;
pub mod restore;

pub use archive::archive_dump;
pub use dump::{perform_dump, DumpResult, TableSummary};
pub use files::{
    dump_exists, list_table_files, read_manifest, read_table_dump, remove_manifest,
    write_manifest, write_table_dump,
};
pub use manifest::DumpMetadata;
pub use restore::{perform_restore, RestoreResult, RestoreWarning, TableOutcome};
