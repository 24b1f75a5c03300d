//! Recording provider
//!
//! Holds tables in memory and records every contract call so tests can
//! assert on ordering without a real database.

#![allow(dead_code)]

use async_trait::async_trait;
use dbrestore_core::{Column, Error, Result, Row};
use dbrestore_providers::DatabaseProvider;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Record of a provider invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MockCall {
    ListTables,
    ListColumns(String),
    ListPrimaryKeys(String),
    ReadAllRows(String),
    Truncate(String),
    Upsert {
        table: String,
        keys: Vec<String>,
        rows: usize,
    },
    ResetSequences(String),
    DisableForeignKeys,
    EnableForeignKeys,
}

#[derive(Clone, Debug, Default)]
pub struct MockTable {
    pub columns: Vec<Column>,
    pub primary_keys: Vec<String>,
    pub rows: Vec<Row>,
}

impl MockTable {
    pub fn new(columns: &[&str], primary_keys: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| Column::new(*c, "TEXT")).collect(),
            primary_keys: primary_keys.iter().map(|k| k.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }
}

/// In-memory provider with call recording and injectable write failures
#[derive(Default)]
pub struct MockProvider {
    tables: Mutex<BTreeMap<String, MockTable>>,
    calls: Mutex<Vec<MockCall>>,
    fail_on: Option<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(self, name: &str, table: MockTable) -> Self {
        self.tables.lock().unwrap().insert(name.to_string(), table);
        self
    }

    /// Make reads from and writes into `table` fail
    pub fn failing_on(mut self, table: &str) -> Self {
        self.fail_on = Some(table.to_string());
        self
    }

    fn check_failure(&self, table: &str) -> Result<()> {
        if self.fail_on.as_deref() == Some(table) {
            return Err(Error::query(table, "injected failure"));
        }
        Ok(())
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn table(&self, name: &str) -> Result<MockTable> {
        self.tables
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::query(name, "no such table"))
    }
}

#[async_trait]
impl DatabaseProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_tables(&self) -> Result<Vec<String>> {
        self.record(MockCall::ListTables);
        Ok(self.tables.lock().unwrap().keys().cloned().collect())
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<Column>> {
        self.record(MockCall::ListColumns(table.to_string()));
        Ok(self.table(table)?.columns)
    }

    async fn list_primary_key_columns(&self, table: &str) -> Result<Vec<String>> {
        self.record(MockCall::ListPrimaryKeys(table.to_string()));
        Ok(self.table(table)?.primary_keys)
    }

    async fn read_all_rows(&self, table: &str) -> Result<Vec<Row>> {
        self.record(MockCall::ReadAllRows(table.to_string()));
        self.check_failure(table)?;
        Ok(self.table(table)?.rows)
    }

    async fn truncate(&self, table: &str) -> Result<()> {
        self.record(MockCall::Truncate(table.to_string()));
        if let Some(t) = self.tables.lock().unwrap().get_mut(table) {
            t.rows.clear();
        }
        Ok(())
    }

    async fn upsert(
        &self,
        table: &str,
        _columns: &[Column],
        primary_keys: &[String],
        rows: &[Row],
    ) -> Result<()> {
        self.record(MockCall::Upsert {
            table: table.to_string(),
            keys: primary_keys.to_vec(),
            rows: rows.len(),
        });
        self.check_failure(table)?;

        let mut tables = self.tables.lock().unwrap();
        let Some(target) = tables.get_mut(table) else {
            return Err(Error::query(table, "no such table"));
        };
        for row in rows {
            let existing = if primary_keys.is_empty() {
                None
            } else {
                target
                    .rows
                    .iter()
                    .position(|r| primary_keys.iter().all(|k| r.get(k) == row.get(k)))
            };
            match existing {
                Some(i) => target.rows[i].extend(row.clone()),
                None => target.rows.push(row.clone()),
            }
        }
        Ok(())
    }

    async fn reset_sequences(&self, table: &str) -> Result<()> {
        self.record(MockCall::ResetSequences(table.to_string()));
        Ok(())
    }

    async fn disable_foreign_key_enforcement(&self) -> Result<()> {
        self.record(MockCall::DisableForeignKeys);
        Ok(())
    }

    async fn enable_foreign_key_enforcement(&self) -> Result<()> {
        self.record(MockCall::EnableForeignKeys);
        Ok(())
    }
}
