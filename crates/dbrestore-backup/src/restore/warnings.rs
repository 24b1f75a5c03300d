//! Non-fatal conditions recorded during a restore

use serde::{Serialize, Serializer};
use std::fmt;

/// A schema-drift or strategy-fallback condition recovered locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreWarning {
    /// The dumped table does not exist in the target database
    MissingTable { table: String },

    /// A dumped column no longer exists in the live table
    DroppedColumn { table: String, column: String },

    /// A live column has no data in the dump
    AddedColumn { table: String, column: String },

    /// The live table has no primary key, so it was emptied before insert
    NoPrimaryKey { table: String },

    /// None of the dumped columns exist in the live table
    NoMatchingColumns { table: String },
}

impl RestoreWarning {
    pub fn table(&self) -> &str {
        match self {
            RestoreWarning::MissingTable { table }
            | RestoreWarning::DroppedColumn { table, .. }
            | RestoreWarning::AddedColumn { table, .. }
            | RestoreWarning::NoPrimaryKey { table }
            | RestoreWarning::NoMatchingColumns { table } => table,
        }
    }
}

impl fmt::Display for RestoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreWarning::MissingTable { table } => write!(
                f,
                "Table \"{table}\" from dump does not exist in database, skipped"
            ),
            RestoreWarning::DroppedColumn { table, column } => write!(
                f,
                "Skipping removed column \"{column}\" in table \"{table}\""
            ),
            RestoreWarning::AddedColumn { table, column } => write!(
                f,
                "New column \"{column}\" in table \"{table}\" will use DB default"
            ),
            RestoreWarning::NoPrimaryKey { table } => write!(
                f,
                "Table \"{table}\" has no primary key, using TRUNCATE + INSERT instead of UPSERT"
            ),
            RestoreWarning::NoMatchingColumns { table } => write!(
                f,
                "Table \"{table}\" shares no columns with the dump, skipped"
            ),
        }
    }
}

impl Serialize for RestoreWarning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_subject() {
        let dropped = RestoreWarning::DroppedColumn {
            table: "users".into(),
            column: "email".into(),
        };
        assert!(dropped.to_string().contains("\"email\""));
        assert_eq!(dropped.table(), "users");

        let no_pk = RestoreWarning::NoPrimaryKey {
            table: "audit_log".into(),
        };
        assert!(no_pk.to_string().contains("no primary key"));
    }

    #[test]
    fn test_serializes_as_message() {
        let warning = RestoreWarning::MissingTable {
            table: "legacy".into(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json, serde_json::json!(warning.to_string()));
    }
}
