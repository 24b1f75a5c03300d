//! Per-table write strategies

use dbrestore_core::batch::chunk;
use dbrestore_core::{Column, RestoreStrategy, Result, Row};
use dbrestore_providers::DatabaseProvider;
use tracing::debug;

/// Picks the strategy from the live table's primary key.
pub fn select_strategy(live_primary_keys: &[String]) -> RestoreStrategy {
    if live_primary_keys.is_empty() {
        RestoreStrategy::Truncate
    } else {
        RestoreStrategy::Upsert
    }
}

/// Writes `rows` into `table` with `strategy`, one batch at a time.
///
/// The truncate strategy empties the table once, then inserts without a key.
pub async fn apply_strategy(
    provider: &dyn DatabaseProvider,
    table: &str,
    strategy: RestoreStrategy,
    columns: &[Column],
    live_primary_keys: &[String],
    rows: &[Row],
) -> Result<()> {
    let keys: &[String] = match strategy {
        RestoreStrategy::Upsert => live_primary_keys,
        RestoreStrategy::Truncate => {
            provider.truncate(table).await?;
            &[]
        }
    };

    for (i, batch) in chunk(rows).enumerate() {
        debug!("{}: writing batch {} ({} rows)", table, i + 1, batch.len());
        provider.upsert(table, columns, keys, batch).await?;
    }
    Ok(())
}
