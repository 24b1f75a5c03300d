//! On-disk format of per-table dump files

use crate::encoding::EncodedValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A row after encoding, ready to be written as JSON.
pub type EncodedRow = BTreeMap<String, EncodedValue>;

/// Column as reported by schema introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    /// Native type name, informational only
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Contents of one `<table>.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDump {
    pub table: String,
    pub primary_keys: Vec<String>,
    /// Ordinal order of the source schema
    pub columns: Vec<Column>,
    pub rows: Vec<EncodedRow>,
}

impl TableDump {
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

/// Per-table write strategy chosen during restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestoreStrategy {
    /// Insert-or-update keyed by the live primary key
    Upsert,
    /// Delete every row, then plain insert
    Truncate,
}

impl RestoreStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestoreStrategy::Upsert => "upsert",
            RestoreStrategy::Truncate => "truncate",
        }
    }
}

impl std::fmt::Display for RestoreStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
