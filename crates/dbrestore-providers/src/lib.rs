//! Provider adapters for dbrestore
//!
//! This crate provides the backend abstraction used by the dump and restore
//! engines, plus the adapters compiled into this build:
//!
//! - SQLite (local database files)

pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteProvider;
pub use traits::DatabaseProvider;

use dbrestore_core::{ConnectionSettings, Error, Result};
use tracing::info;

/// Create a connected provider for the given profile settings
pub fn create_provider(settings: &ConnectionSettings) -> Result<Box<dyn DatabaseProvider>> {
    match settings {
        ConnectionSettings::Sqlite { path } => {
            info!("Connecting to sqlite database {}", path.display());
            Ok(Box::new(SqliteProvider::open_existing(path)?))
        }
        ConnectionSettings::Postgres(_) | ConnectionSettings::Mysql(_) => {
            Err(Error::unsupported_provider(settings.kind().as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbrestore_core::config::ServerSettings;

    #[test]
    fn test_create_sqlite_provider() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("dev.db");
        SqliteProvider::open(&path).unwrap();

        let settings = ConnectionSettings::Sqlite { path };
        let provider = create_provider(&settings).unwrap();
        assert_eq!(provider.name(), "sqlite");
    }

    #[test]
    fn test_missing_sqlite_file_is_not_created() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("typo.db");

        let settings = ConnectionSettings::Sqlite { path: path.clone() };
        let err = create_provider(&settings).err().unwrap();
        assert!(err.is_connection());
        assert!(!path.exists());
    }

    #[test]
    fn test_server_backends_not_compiled_in() {
        let settings = ConnectionSettings::Mysql(ServerSettings {
            host: "localhost".to_string(),
            port: 3306,
            database: "app".to_string(),
            user: "root".to_string(),
        });
        let err = create_provider(&settings).err().unwrap();
        assert!(matches!(err, Error::UnsupportedProvider { .. }));
    }
}
