//! Shared utility functions for dbrestore crates

use std::path::PathBuf;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "DBRESTORE_CONFIG_DIR";

/// Get the dbrestore configuration directory
///
/// `DBRESTORE_CONFIG_DIR` wins over the platform config dir so tests and
/// containers can point at a scratch location.
pub fn get_config_dir() -> crate::Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    dirs::config_dir()
        .map(|dir| dir.join("dbrestore"))
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine configuration directory",
            )
            .into()
        })
}

/// Quote an SQL identifier with double quotes, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_from_env() {
        std::env::set_var(CONFIG_DIR_ENV, "/tmp/dbrestore-test-config");
        let dir = get_config_dir().unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);
        assert_eq!(dir, PathBuf::from("/tmp/dbrestore-test-config"));
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("users"), "\"users\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
