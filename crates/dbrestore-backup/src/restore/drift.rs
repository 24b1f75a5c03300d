//! Column reconciliation between a dump and the live schema

use super::warnings::RestoreWarning;
use dbrestore_core::{Column, Row, Value};
use std::collections::HashSet;

/// How the dumped columns of one table line up with its live columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDrift {
    /// Dumped columns that still exist live, in dump order
    pub matching: Vec<Column>,

    /// Dumped columns absent from the live table
    pub dropped: Vec<String>,

    /// Live columns absent from the dump
    pub added: Vec<String>,
}

impl ColumnDrift {
    pub fn compute(dumped: &[Column], live: &[Column]) -> Self {
        let live_names: HashSet<&str> = live.iter().map(|c| c.name.as_str()).collect();
        let dumped_names: HashSet<&str> = dumped.iter().map(|c| c.name.as_str()).collect();

        let (matching, dropped): (Vec<&Column>, Vec<&Column>) = dumped
            .iter()
            .partition(|c| live_names.contains(c.name.as_str()));

        Self {
            matching: matching.into_iter().cloned().collect(),
            dropped: dropped.into_iter().map(|c| c.name.clone()).collect(),
            added: live
                .iter()
                .filter(|c| !dumped_names.contains(c.name.as_str()))
                .map(|c| c.name.clone())
                .collect(),
        }
    }

    pub fn has_drift(&self) -> bool {
        !self.dropped.is_empty() || !self.added.is_empty()
    }

    /// One warning per dropped column, then one per added column.
    pub fn warnings(&self, table: &str) -> Vec<RestoreWarning> {
        let dropped = self.dropped.iter().map(|column| RestoreWarning::DroppedColumn {
            table: table.to_string(),
            column: column.clone(),
        });
        let added = self.added.iter().map(|column| RestoreWarning::AddedColumn {
            table: table.to_string(),
            column: column.clone(),
        });
        dropped.chain(added).collect()
    }

    /// Keeps only matching columns; a matching column missing from `row`
    /// becomes an explicit null.
    pub fn project(&self, mut row: Row) -> Row {
        self.matching
            .iter()
            .map(|c| {
                let value = row.remove(&c.name).unwrap_or(Value::Null);
                (c.name.clone(), value)
            })
            .collect()
    }
}
