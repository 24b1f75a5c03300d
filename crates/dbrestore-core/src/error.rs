//! Error types for dbrestore-core

use thiserror::Error;

/// Result type alias using dbrestore-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dbrestore
#[derive(Error, Debug)]
pub enum Error {
    /// Cannot establish or use the database session
    #[error("Connection error ({provider}): {message}")]
    Connection { provider: String, message: String },

    /// A statement issued against the database failed
    #[error("Query failed on table {table}: {message}")]
    Query { table: String, message: String },

    /// A tagged value could not be turned back into a native value
    #[error("Cannot decode {kind} value: {message}")]
    Codec { kind: String, message: String },

    /// The dump directory has no manifest
    #[error("No complete dump found in {dir} (missing {file})")]
    ManifestMissing { dir: String, file: String },

    /// The manifest was written by a newer format version
    #[error("Unsupported dump format version {found} (this build reads up to {supported})")]
    UnsupportedDumpVersion { found: u32, supported: u32 },

    /// Profile lookup failed
    #[error("Profile \"{name}\" not found")]
    ProfileNotFound { name: String },

    /// Profile name contains characters that cannot be used as a file name
    #[error("Invalid profile name \"{name}\": use letters, digits, '-' or '_'")]
    InvalidProfileName { name: String },

    /// Table name cannot be stored as a dump file name
    #[error("Table name \"{name}\" cannot be stored in a dump directory")]
    InvalidTableName { name: String },

    /// Backend exists as a profile kind but has no adapter in this build
    #[error("Provider \"{provider}\" is not supported by this build (available: sqlite)")]
    UnsupportedProvider { provider: String },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a connection error
    pub fn connection(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a query error
    pub fn query(table: impl Into<String>, message: impl ToString) -> Self {
        Self::Query {
            table: table.into(),
            message: message.to_string(),
        }
    }

    /// Create a codec error
    pub fn codec(kind: impl Into<String>, message: impl ToString) -> Self {
        Self::Codec {
            kind: kind.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing manifest error
    pub fn manifest_missing(dir: impl Into<String>, file: impl Into<String>) -> Self {
        Self::ManifestMissing {
            dir: dir.into(),
            file: file.into(),
        }
    }

    /// Create a profile not found error
    pub fn profile_not_found(name: impl Into<String>) -> Self {
        Self::ProfileNotFound { name: name.into() }
    }

    /// Create an unsupported provider error
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        Self::UnsupportedProvider {
            provider: provider.into(),
        }
    }

    /// True for failures that come from the database session rather than from data
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }
}
