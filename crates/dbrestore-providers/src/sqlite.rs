//! SQLite provider
//!
//! Backed by a single `rusqlite` connection. Calls run inline on the caller's
//! task.

use crate::traits::DatabaseProvider;
use async_trait::async_trait;
use chrono::SecondsFormat;
use dbrestore_core::utils::quote_identifier;
use dbrestore_core::{Column, Error, Result, Row, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

const PROVIDER_NAME: &str = "sqlite";

/// Provider for SQLite database files
pub struct SqliteProvider {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteProvider {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::connection(PROVIDER_NAME, format!("{}: {e}", path.display())))?;
        debug!("Opened SQLite database {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open the database file at `path`, failing when it does not exist
    pub fn open_existing(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| Error::connection(PROVIDER_NAME, format!("{}: {e}", path.display())))?;
        debug!("Opened SQLite database {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::connection(PROVIDER_NAME, e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
            path: None,
        }
    }

    /// Database file path, `None` for in-memory databases
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run raw SQL statements (schema setup, seeding)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock()?
            .execute_batch(sql)
            .map_err(|e| Error::query("<batch>", e))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::connection(PROVIDER_NAME, "connection lock poisoned"))
    }

    fn table_info(&self, table: &str) -> Result<Vec<(String, String, i64)>> {
        let conn = self.lock()?;
        let sql = format!("PRAGMA table_info({})", quote_identifier(table));
        let mut stmt = conn.prepare(&sql).map_err(|e| Error::query(table, e))?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(|e| Error::query(table, e))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::query(table, e))
    }
}

#[async_trait]
impl DatabaseProvider for SqliteProvider {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
            )
            .map_err(|e| Error::query("sqlite_master", e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| Error::query("sqlite_master", e))?;
        names
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::query("sqlite_master", e))
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<Column>> {
        Ok(self
            .table_info(table)?
            .into_iter()
            .map(|(name, data_type, _)| Column::new(name, data_type))
            .collect())
    }

    async fn list_primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        // `pk` is the 1-based position within the key, 0 for non-key columns
        let mut keyed: Vec<(i64, String)> = self
            .table_info(table)?
            .into_iter()
            .filter(|(_, _, pk)| *pk > 0)
            .map(|(name, _, pk)| (pk, name))
            .collect();
        keyed.sort();
        Ok(keyed.into_iter().map(|(_, name)| name).collect())
    }

    async fn read_all_rows(&self, table: &str) -> Result<Vec<Row>> {
        let conn = self.lock()?;
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let mut stmt = conn.prepare(&sql).map_err(|e| Error::query(table, e))?;
        let names: Vec<String> = stmt.column_names().iter().map(|n| n.to_string()).collect();

        let mut rows = stmt.query([]).map_err(|e| Error::query(table, e))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| Error::query(table, e))? {
            let mut record = Row::new();
            for (i, name) in names.iter().enumerate() {
                let value = row.get_ref(i).map_err(|e| Error::query(table, e))?;
                record.insert(name.clone(), from_sql(value));
            }
            out.push(record);
        }

        debug!("Read {} rows from {}", out.len(), table);
        Ok(out)
    }

    async fn truncate(&self, table: &str) -> Result<()> {
        let sql = format!("DELETE FROM {}", quote_identifier(table));
        self.lock()?
            .execute(&sql, [])
            .map_err(|e| Error::query(table, e))?;
        Ok(())
    }

    async fn upsert(
        &self,
        table: &str,
        columns: &[Column],
        primary_keys: &[String],
        rows: &[Row],
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        if columns.is_empty() {
            return Err(Error::query(table, "no columns to write"));
        }

        let sql = upsert_sql(table, columns, primary_keys);
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(|e| Error::query(table, e))?;
        {
            let mut stmt = tx.prepare(&sql).map_err(|e| Error::query(table, e))?;
            for row in rows {
                let params: Vec<SqlValue> = columns
                    .iter()
                    .map(|c| to_sql(row.get(&c.name).unwrap_or(&Value::Null)))
                    .collect();
                stmt.execute(params_from_iter(params.iter()))
                    .map_err(|e| Error::query(table, e))?;
            }
        }
        tx.commit().map_err(|e| Error::query(table, e))?;

        debug!("Wrote {} rows into {}", rows.len(), table);
        Ok(())
    }

    async fn reset_sequences(&self, _table: &str) -> Result<()> {
        // sqlite_sequence already tracks the largest explicit rowid
        Ok(())
    }

    async fn disable_foreign_key_enforcement(&self) -> Result<()> {
        self.lock()?
            .execute_batch("PRAGMA foreign_keys = OFF")
            .map_err(|e| Error::connection(PROVIDER_NAME, e.to_string()))
    }

    async fn enable_foreign_key_enforcement(&self) -> Result<()> {
        self.lock()?
            .execute_batch("PRAGMA foreign_keys = ON")
            .map_err(|e| Error::connection(PROVIDER_NAME, e.to_string()))
    }
}

/// `INSERT ... ON CONFLICT` statement for one row of `columns`
fn upsert_sql(table: &str, columns: &[Column], primary_keys: &[String]) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");

    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        column_list,
        placeholders
    );

    if !primary_keys.is_empty() {
        let conflict = primary_keys
            .iter()
            .map(|k| quote_identifier(k))
            .collect::<Vec<_>>()
            .join(", ");
        let updates = columns
            .iter()
            .filter(|c| !primary_keys.contains(&c.name))
            .map(|c| {
                let col = quote_identifier(&c.name);
                format!("{col} = excluded.{col}")
            })
            .collect::<Vec<_>>();

        if updates.is_empty() {
            sql.push_str(&format!(" ON CONFLICT ({conflict}) DO NOTHING"));
        } else {
            sql.push_str(&format!(
                " ON CONFLICT ({conflict}) DO UPDATE SET {}",
                updates.join(", ")
            ));
        }
    }

    sql
}

fn from_sql(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        // SQLite does not enforce UTF-8 in TEXT; keep such values byte for byte
        ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
            Ok(text) => Value::Text(text.to_string()),
            Err(_) => Value::Bytes(bytes.to_vec()),
        },
        ValueRef::Blob(bytes) => Value::Bytes(bytes.to_vec()),
    }
}

fn to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::BigInt(i) => i64::try_from(*i)
            .map(SqlValue::Integer)
            .unwrap_or_else(|_| SqlValue::Text(i.to_string())),
        Value::Real(f) => SqlValue::Real(*f),
        Value::Text(s) | Value::Decimal(s) => SqlValue::Text(s.clone()),
        Value::Bytes(b) => SqlValue::Blob(b.clone()),
        Value::DateTime(dt) => SqlValue::Text(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::Json(v) => SqlValue::Text(v.to_string()),
        Value::Array(items) => SqlValue::Text(serde_json::Value::Array(items.clone()).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with(sql: &str) -> SqliteProvider {
        let provider = SqliteProvider::open_in_memory().unwrap();
        provider.execute_batch(sql).unwrap();
        provider
    }

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_list_tables_skips_internal() {
        let provider = provider_with(
            "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT);
             INSERT INTO users (name) VALUES ('a');",
        );
        // AUTOINCREMENT creates sqlite_sequence
        let tables = provider.list_tables().await.unwrap();
        assert_eq!(tables, vec!["users"]);
    }

    #[tokio::test]
    async fn test_columns_in_ordinal_order() {
        let provider = provider_with("CREATE TABLE t (b TEXT, a INTEGER, c BLOB)");
        let columns = provider.list_columns("t").await.unwrap();
        assert_eq!(
            columns,
            vec![
                Column::new("b", "TEXT"),
                Column::new("a", "INTEGER"),
                Column::new("c", "BLOB"),
            ]
        );
    }

    #[tokio::test]
    async fn test_composite_primary_key_order() {
        let provider = provider_with(
            "CREATE TABLE memberships (user_id INTEGER, org_id INTEGER, role TEXT,
             PRIMARY KEY (org_id, user_id))",
        );
        let keys = provider.list_primary_key_columns("memberships").await.unwrap();
        assert_eq!(keys, vec!["org_id", "user_id"]);

        let provider = provider_with("CREATE TABLE logs (message TEXT)");
        assert!(provider.list_primary_key_columns("logs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_typed_values() {
        let provider = provider_with(
            "CREATE TABLE t (i INTEGER, r REAL, s TEXT, b BLOB, n TEXT);
             INSERT INTO t VALUES (1, 2.5, 'x', X'0102', NULL);",
        );
        let rows = provider.read_all_rows("t").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["i"], Value::Integer(1));
        assert_eq!(rows[0]["r"], Value::Real(2.5));
        assert_eq!(rows[0]["s"], Value::Text("x".into()));
        assert_eq!(rows[0]["b"], Value::Bytes(vec![1, 2]));
        assert_eq!(rows[0]["n"], Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_utf8_text_kept_as_bytes() {
        let provider = provider_with(
            "CREATE TABLE t (id INTEGER PRIMARY KEY, s TEXT);
             INSERT INTO t VALUES (1, CAST(X'61FF62' AS TEXT));",
        );
        let rows = provider.read_all_rows("t").await.unwrap();
        assert_eq!(rows[0]["s"], Value::Bytes(vec![0x61, 0xff, 0x62]));
    }

    #[tokio::test]
    async fn test_upsert_without_columns_fails() {
        let provider = provider_with("CREATE TABLE logs (message TEXT)");
        let rows = vec![row(&[("msg", "dropped".into())])];

        let err = provider.upsert("logs", &[], &[], &rows).await.unwrap_err();
        assert!(matches!(err, Error::Query { .. }));

        // Nothing to write is fine
        provider.upsert("logs", &[], &[], &[]).await.unwrap();
    }

    #[test]
    fn test_open_existing_requires_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("missing.db");

        let err = SqliteProvider::open_existing(&path).err().unwrap();
        assert!(err.is_connection());
        assert!(!path.exists());

        SqliteProvider::open(&path).unwrap();
        assert!(SqliteProvider::open_existing(&path).is_ok());
    }

    #[tokio::test]
    async fn test_upsert_updates_and_inserts() {
        let provider = provider_with(
            "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT);
             INSERT INTO users VALUES (1, 'Seed');",
        );
        let columns = provider.list_columns("users").await.unwrap();
        let rows = vec![
            row(&[("id", Value::Integer(1)), ("name", "Alice".into())]),
            row(&[("id", Value::Integer(2)), ("name", "Bob".into())]),
        ];

        provider
            .upsert("users", &columns, &["id".to_string()], &rows)
            .await
            .unwrap();

        let mut stored = provider.read_all_rows("users").await.unwrap();
        stored.sort_by_key(|r| match r["id"] {
            Value::Integer(i) => i,
            _ => 0,
        });
        assert_eq!(stored, rows);
    }

    #[tokio::test]
    async fn test_upsert_key_only_table_does_nothing_on_conflict() {
        let provider = provider_with(
            "CREATE TABLE tags (name TEXT PRIMARY KEY);
             INSERT INTO tags VALUES ('rust');",
        );
        let columns = provider.list_columns("tags").await.unwrap();
        let rows = vec![row(&[("name", "rust".into())]), row(&[("name", "sql".into())])];

        provider
            .upsert("tags", &columns, &["name".to_string()], &rows)
            .await
            .unwrap();

        assert_eq!(provider.read_all_rows("tags").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_plain_insert_and_truncate() {
        let provider = provider_with(
            "CREATE TABLE logs (message TEXT, level TEXT);
             INSERT INTO logs VALUES ('old', 'debug');",
        );
        provider.truncate("logs").await.unwrap();
        assert!(provider.read_all_rows("logs").await.unwrap().is_empty());

        let columns = provider.list_columns("logs").await.unwrap();
        let rows = vec![row(&[("message", "hello".into())])];
        provider.upsert("logs", &columns, &[], &rows).await.unwrap();

        let stored = provider.read_all_rows("logs").await.unwrap();
        assert_eq!(stored[0]["message"], Value::Text("hello".into()));
        // Missing values are written as null
        assert_eq!(stored[0]["level"], Value::Null);
    }

    #[tokio::test]
    async fn test_foreign_key_toggle() {
        let provider = provider_with(
            "CREATE TABLE roles (id INTEGER PRIMARY KEY);
             CREATE TABLE users (id INTEGER PRIMARY KEY, role_id INTEGER REFERENCES roles(id));",
        );
        let columns = provider.list_columns("users").await.unwrap();
        let orphan = vec![row(&[("id", Value::Integer(1)), ("role_id", Value::Integer(99))])];

        provider.enable_foreign_key_enforcement().await.unwrap();
        assert!(provider
            .upsert("users", &columns, &["id".to_string()], &orphan)
            .await
            .is_err());

        provider.disable_foreign_key_enforcement().await.unwrap();
        provider
            .upsert("users", &columns, &["id".to_string()], &orphan)
            .await
            .unwrap();
    }

    #[test]
    fn test_upsert_sql_shape() {
        let columns = vec![Column::new("id", "INTEGER"), Column::new("name", "TEXT")];
        assert_eq!(
            upsert_sql("users", &columns, &["id".to_string()]),
            "INSERT INTO \"users\" (\"id\", \"name\") VALUES (?, ?) \
             ON CONFLICT (\"id\") DO UPDATE SET \"name\" = excluded.\"name\""
        );
        assert_eq!(
            upsert_sql("logs", &columns, &[]),
            "INSERT INTO \"logs\" (\"id\", \"name\") VALUES (?, ?)"
        );
    }

    #[test]
    fn test_value_binding() {
        assert_eq!(to_sql(&Value::Bool(true)), SqlValue::Integer(1));
        assert_eq!(to_sql(&Value::BigInt(5)), SqlValue::Integer(5));
        assert_eq!(
            to_sql(&Value::BigInt(i128::from(i64::MAX) + 1)),
            SqlValue::Text("9223372036854775808".to_string())
        );
        assert_eq!(
            to_sql(&Value::Json(serde_json::json!({"a": 1}))),
            SqlValue::Text("{\"a\":1}".to_string())
        );
    }
}
