//! Provider trait definitions

use async_trait::async_trait;
use dbrestore_core::{Column, Result, Row};

/// Capability set the dump and restore engines need from a database backend.
///
/// Implementations own dialect concerns (quoting, placeholders, catalog
/// queries). Every method may fail with [`dbrestore_core::Error::Connection`]
/// or [`dbrestore_core::Error::Query`]; callers propagate those without retry.
///
/// A provider wraps a single session. It is used by one engine at a time and
/// never concurrently.
#[async_trait]
pub trait DatabaseProvider: Send + Sync {
    /// Get the provider name (e.g. "sqlite")
    fn name(&self) -> &'static str;

    /// User tables, excluding the backend's own catalog tables
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Columns of `table` in declared ordinal order
    async fn list_columns(&self, table: &str) -> Result<Vec<Column>>;

    /// Primary key columns of `table`, empty when it has none
    async fn list_primary_key_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Every row of `table`
    async fn read_all_rows(&self, table: &str) -> Result<Vec<Row>>;

    /// Delete every row of `table`
    async fn truncate(&self, table: &str) -> Result<()>;

    /// Write `rows` into `columns` of `table`.
    ///
    /// With a non-empty `primary_keys`, rows whose key already exists have
    /// every non-key column updated in place. With an empty `primary_keys`
    /// this is a plain insert. A value missing from a row is written as null.
    async fn upsert(
        &self,
        table: &str,
        columns: &[Column],
        primary_keys: &[String],
        rows: &[Row],
    ) -> Result<()>;

    /// Realign identity/sequence generators of `table` to `max + 1`.
    /// Backends without explicit sequences succeed without doing anything.
    async fn reset_sequences(&self, table: &str) -> Result<()>;

    /// Stop enforcing foreign keys for this session
    async fn disable_foreign_key_enforcement(&self) -> Result<()>;

    /// Resume enforcing foreign keys for this session
    async fn enable_foreign_key_enforcement(&self) -> Result<()>;
}
