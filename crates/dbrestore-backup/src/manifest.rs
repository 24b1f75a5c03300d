//! Dump manifest format and metadata.
//!
//! The manifest is written last into every dump directory. Its presence is
//! what marks a dump as complete; per-table files on their own never do.

use chrono::{DateTime, SecondsFormat, Utc};
use dbrestore_core::constants::DUMP_FORMAT_VERSION;
use dbrestore_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Contents of `_metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpMetadata {
    /// Provider label the dump was taken with (e.g. "sqlite")
    pub provider: String,

    /// ISO-8601 creation time
    pub timestamp: String,

    /// Dumped tables in dump order
    pub tables: Vec<String>,

    /// Dump format version
    pub version: u32,
}

impl DumpMetadata {
    /// Creates a manifest stamped with the current time.
    pub fn new(provider: impl Into<String>, tables: Vec<String>) -> Self {
        Self {
            provider: provider.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            tables,
            version: DUMP_FORMAT_VERSION,
        }
    }

    /// Serializes the manifest to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rejects manifests written by a newer format version.
    pub fn validate(&self) -> Result<()> {
        if self.version > DUMP_FORMAT_VERSION {
            return Err(Error::UnsupportedDumpVersion {
                found: self.version,
                supported: DUMP_FORMAT_VERSION,
            });
        }
        Ok(())
    }

    /// Creation time, if the timestamp parses.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}
