//! Archiving of a previous dump before a new one is written.

use crate::files::list_table_files;
use chrono::Utc;
use dbrestore_core::constants::METADATA_FILENAME;
use dbrestore_core::Result;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Builder as TarBuilder;
use tracing::info;

/// Packs every dump file in `dir` into `archive-<timestamp>.tar.gz` inside
/// `dir`, then removes the packed files.
///
/// Returns the path of the created archive. Files that are not part of a
/// dump (earlier archives included) are left alone.
pub async fn archive_dump(dir: &Path) -> Result<PathBuf> {
    let mut files: Vec<String> = list_table_files(dir)
        .await?
        .into_iter()
        .map(|table| format!("{table}.json"))
        .collect();
    if dir.join(METADATA_FILENAME).is_file() {
        files.push(METADATA_FILENAME.to_string());
    }

    let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ");
    let archive_path = dir.join(format!("archive-{stamp}.tar.gz"));

    let dir_owned = dir.to_path_buf();
    let target = archive_path.clone();
    let packed = files.clone();
    tokio::task::spawn_blocking(move || write_archive(&dir_owned, &target, &packed))
        .await
        .map_err(std::io::Error::other)??;

    for name in &files {
        tokio::fs::remove_file(dir.join(name)).await?;
    }

    info!(
        "Archived {} files to {}",
        files.len(),
        archive_path.display()
    );
    Ok(archive_path)
}

fn write_archive(dir: &Path, destination: &Path, files: &[String]) -> Result<()> {
    let file = File::create(destination)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = TarBuilder::new(encoder);

    for name in files {
        archive.append_path_with_name(dir.join(name), name)?;
    }

    archive.into_inner()?.finish()?;
    Ok(())
}
