//! SQLite fixtures

#![allow(dead_code)]

use dbrestore_core::{Row, Value};
use dbrestore_providers::{DatabaseProvider, SqliteProvider};
use std::path::Path;

pub const APP_SCHEMA: &str = "
    CREATE TABLE roles (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    );
    CREATE TABLE users (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT,
        role_id INTEGER REFERENCES roles(id)
    );
    CREATE TABLE _prisma_migrations (
        id TEXT PRIMARY KEY,
        migration_name TEXT NOT NULL
    );
";

pub const APP_DATA: &str = "
    INSERT INTO roles (id, name) VALUES (1, 'admin'), (2, 'member');
    INSERT INTO users (id, name, email, role_id) VALUES
        (1, 'Alice', 'alice@example.com', 1),
        (2, 'Bob', 'bob@example.com', 2);
    INSERT INTO _prisma_migrations (id, migration_name) VALUES ('m1', 'init');
";

/// Opens a database file under `dir` and runs `sql` against it.
pub fn sqlite_db(dir: &Path, file: &str, sql: &str) -> SqliteProvider {
    let provider = SqliteProvider::open(&dir.join(file)).unwrap();
    provider.execute_batch(sql).unwrap();
    provider
}

pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// Rows of `table` sorted by `id`.
pub async fn rows_by_id(provider: &dyn DatabaseProvider, table: &str) -> Vec<Row> {
    let mut rows = provider.read_all_rows(table).await.unwrap();
    rows.sort_by_key(|r| match r.get("id") {
        Some(Value::Integer(i)) => *i,
        _ => i64::MAX,
    });
    rows
}
