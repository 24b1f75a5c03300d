//! Dump directory layout
//!
//! ```text
//! <dir>/<table>.json     one TableDump per table
//! <dir>/_metadata.json   manifest, written last
//! ```

use crate::manifest::DumpMetadata;
use dbrestore_core::constants::{DUMP_FILE_EXTENSION, METADATA_FILENAME};
use dbrestore_core::{Error, Result, TableDump};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Path of the file holding `table`'s dump.
///
/// Names that would escape `dir`, or collide with the manifest, are rejected.
pub fn table_file_path(dir: &Path, table: &str) -> Result<PathBuf> {
    let file_name = format!("{table}.{DUMP_FILE_EXTENSION}");
    let unsafe_name = table.is_empty()
        || table == "."
        || table == ".."
        || table.contains(['/', '\\', '\0'])
        || file_name == METADATA_FILENAME;
    if unsafe_name {
        return Err(Error::InvalidTableName {
            name: table.to_string(),
        });
    }
    Ok(dir.join(file_name))
}

/// Path of the manifest.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(METADATA_FILENAME)
}

/// Whether `dir` holds a complete dump.
pub fn dump_exists(dir: &Path) -> bool {
    manifest_path(dir).is_file()
}

pub async fn write_table_dump(dir: &Path, dump: &TableDump) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = table_file_path(dir, &dump.table)?;
    fs::write(&path, serde_json::to_string_pretty(dump)?).await?;
    debug!("Wrote {}", path.display());
    Ok(path)
}

pub async fn read_table_dump(dir: &Path, table: &str) -> Result<TableDump> {
    let content = fs::read_to_string(table_file_path(dir, table)?).await?;
    Ok(serde_json::from_str(&content)?)
}

pub async fn write_manifest(dir: &Path, manifest: &DumpMetadata) -> Result<PathBuf> {
    fs::create_dir_all(dir).await?;
    let path = manifest_path(dir);
    fs::write(&path, manifest.to_json()?).await?;
    Ok(path)
}

/// Removes the manifest, marking `dir` as no longer holding a complete dump.
pub async fn remove_manifest(dir: &Path) -> Result<()> {
    match fs::remove_file(manifest_path(dir)).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Reads the manifest; a missing manifest means there is no complete dump.
pub async fn read_manifest(dir: &Path) -> Result<DumpMetadata> {
    if !dump_exists(dir) {
        return Err(Error::manifest_missing(
            dir.display().to_string(),
            METADATA_FILENAME,
        ));
    }
    let content = fs::read_to_string(manifest_path(dir)).await?;
    DumpMetadata::from_json(&content)
}

/// Table names with a dump file in `dir`, sorted by name.
pub async fn list_table_files(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut tables = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };
        if name == METADATA_FILENAME || !entry.file_type().await?.is_file() {
            continue;
        }
        if let Some(table) = name.strip_suffix(&format!(".{DUMP_FILE_EXTENSION}")) {
            tables.push(table.to_string());
        }
    }

    tables.sort();
    Ok(tables)
}
