//! Restore engine
//!
//! Replays a dump directory into a live database, reconciling each table
//! against the schema it finds there:
//!
//! 1. The manifest is read and its format version checked.
//! 2. Foreign-key enforcement is switched off for the whole run.
//! 3. Each table file is decoded, projected onto the columns that still
//!    exist, and written with the strategy its live primary key allows.
//! 4. Sequences of restored tables are realigned.
//! 5. Foreign-key enforcement is switched back on, even after a failure.
//!
//! Nothing is rolled back: tables written before a failure stay written.

use crate::files::{list_table_files, read_manifest, read_table_dump};
use dbrestore_core::encoding::decode_row;
use dbrestore_core::{Error, RestoreStrategy, Result, Row};
use dbrestore_providers::DatabaseProvider;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

pub mod drift;
pub mod guard;
pub mod strategy;
pub mod warnings;

pub use drift::ColumnDrift;
pub use guard::{with_foreign_keys_disabled, ForeignKeyGuard};
pub use strategy::{apply_strategy, select_strategy};
pub use warnings::RestoreWarning;

/// What happened to one restored table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOutcome {
    pub table: String,
    pub row_count: usize,
    pub strategy: RestoreStrategy,
}

/// Outcome of [`perform_restore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResult {
    pub tables: Vec<TableOutcome>,
    pub total_rows: usize,
    pub warnings: Vec<RestoreWarning>,
}

/// Restores the dump in `input_dir` through `provider`.
pub async fn perform_restore(
    provider: &dyn DatabaseProvider,
    input_dir: &Path,
) -> Result<RestoreResult> {
    let start = Instant::now();

    let manifest = read_manifest(input_dir).await?;
    manifest.validate()?;
    info!(
        "Starting restore: dump from {} taken {}, {} tables",
        manifest.provider,
        manifest.timestamp,
        manifest.tables.len()
    );

    let table_files = list_table_files(input_dir).await?;

    let result = with_foreign_keys_disabled(provider, async {
        let live_tables: HashSet<String> = provider.list_tables().await?.into_iter().collect();
        let mut result = RestoreResult::default();

        for table in &table_files {
            if let Some(outcome) =
                restore_table(provider, input_dir, table, &live_tables, &mut result.warnings)
                    .await?
            {
                result.total_rows += outcome.row_count;
                result.tables.push(outcome);
            }
        }

        for outcome in &result.tables {
            provider.reset_sequences(&outcome.table).await?;
        }

        Ok::<_, Error>(result)
    })
    .await?;

    info!(
        "Restore complete: {} tables, {} rows, {} warnings in {:?}",
        result.tables.len(),
        result.total_rows,
        result.warnings.len(),
        start.elapsed()
    );
    Ok(result)
}

async fn restore_table(
    provider: &dyn DatabaseProvider,
    input_dir: &Path,
    table: &str,
    live_tables: &HashSet<String>,
    warnings: &mut Vec<RestoreWarning>,
) -> Result<Option<TableOutcome>> {
    let dump = read_table_dump(input_dir, table).await?;

    if !live_tables.contains(&dump.table) {
        let warning = RestoreWarning::MissingTable {
            table: dump.table.clone(),
        };
        warn!("{}", warning);
        warnings.push(warning);
        return Ok(None);
    }

    let live_columns = provider.list_columns(&dump.table).await?;
    let drift = ColumnDrift::compute(&dump.columns, &live_columns);
    for warning in drift.warnings(&dump.table) {
        warn!("{}", warning);
        warnings.push(warning);
    }

    // Writing no columns would leave a truncated table empty
    if drift.matching.is_empty() {
        let warning = RestoreWarning::NoMatchingColumns {
            table: dump.table.clone(),
        };
        warn!("{}", warning);
        warnings.push(warning);
        return Ok(None);
    }

    let rows = dump
        .rows
        .iter()
        .map(|encoded| decode_row(encoded).map(|row| drift.project(row)))
        .collect::<Result<Vec<Row>>>()?;

    let live_primary_keys = provider.list_primary_key_columns(&dump.table).await?;
    let strategy = select_strategy(&live_primary_keys);
    if strategy == RestoreStrategy::Truncate {
        let warning = RestoreWarning::NoPrimaryKey {
            table: dump.table.clone(),
        };
        warn!("{}", warning);
        warnings.push(warning);
    }

    apply_strategy(
        provider,
        &dump.table,
        strategy,
        &drift.matching,
        &live_primary_keys,
        &rows,
    )
    .await?;

    debug!("Restored {} ({} rows, {})", dump.table, rows.len(), strategy);
    Ok(Some(TableOutcome {
        table: dump.table,
        row_count: rows.len(),
        strategy,
    }))
}
