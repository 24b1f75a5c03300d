//! Dump engine

use crate::files::{remove_manifest, write_manifest, write_table_dump};
use crate::manifest::DumpMetadata;
use dbrestore_core::constants::is_excluded_table;
use dbrestore_core::encoding::encode_row;
use dbrestore_core::{Result, TableDump};
use dbrestore_providers::DatabaseProvider;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Row count written for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub table: String,
    pub row_count: usize,
}

/// Outcome of [`perform_dump`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpResult {
    pub tables: Vec<TableSummary>,
    pub total_rows: usize,
}

/// Captures every non-excluded table into `output_dir`.
///
/// One `<table>.json` file is written per table, then the manifest. A failure
/// on any table aborts the dump before the manifest exists, so a partial
/// directory is never mistaken for a complete dump. An earlier manifest in
/// `output_dir` is removed before any table file is written.
pub async fn perform_dump(
    provider: &dyn DatabaseProvider,
    provider_label: &str,
    output_dir: &Path,
) -> Result<DumpResult> {
    let start = Instant::now();
    info!(
        "Starting dump: provider={}, dir={}",
        provider_label,
        output_dir.display()
    );

    tokio::fs::create_dir_all(output_dir).await?;
    // A previous dump stops counting as complete once its files are replaced
    remove_manifest(output_dir).await?;

    let tables: Vec<String> = provider
        .list_tables()
        .await?
        .into_iter()
        .filter(|t| !is_excluded_table(t))
        .collect();

    let mut summaries = Vec::with_capacity(tables.len());
    for table in &tables {
        let columns = provider.list_columns(table).await?;
        let primary_keys = provider.list_primary_key_columns(table).await?;
        let rows = provider.read_all_rows(table).await?;

        let dump = TableDump {
            table: table.clone(),
            primary_keys,
            columns,
            rows: rows.iter().map(encode_row).collect(),
        };
        write_table_dump(output_dir, &dump).await?;

        debug!("Dumped {} ({} rows)", table, dump.rows.len());
        summaries.push(TableSummary {
            table: table.clone(),
            row_count: dump.rows.len(),
        });
    }

    write_manifest(output_dir, &DumpMetadata::new(provider_label, tables)).await?;

    let total_rows = summaries.iter().map(|s| s.row_count).sum();
    info!(
        "Dump complete: {} tables, {} rows in {:?}",
        summaries.len(),
        total_rows,
        start.elapsed()
    );

    Ok(DumpResult {
        tables: summaries,
        total_rows,
    })
}
