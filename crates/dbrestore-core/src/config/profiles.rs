//! Keyed file store for connection profiles
//!
//! Each profile lives in `<config_dir>/profiles/<name>.yaml`. Passwords are
//! never written to disk.

use crate::error::{Error, Result};
use crate::utils::get_config_dir;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of stored profiles
pub const PROFILE_EXTENSION: &str = "yaml";

/// Database backend a profile connects to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Sqlite,
    Postgres,
    Mysql,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Sqlite => "sqlite",
            ProviderKind::Postgres => "postgres",
            ProviderKind::Mysql => "mysql",
        }
    }

    /// Default `(port, user)` for server backends
    pub fn server_defaults(&self) -> Option<(u16, &'static str)> {
        match self {
            ProviderKind::Sqlite => None,
            ProviderKind::Postgres => Some((5432, "postgres")),
            ProviderKind::Mysql => Some((3306, "root")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for a network database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
}

/// Backend-specific connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum ConnectionSettings {
    Sqlite { path: PathBuf },
    Postgres(ServerSettings),
    Mysql(ServerSettings),
}

impl ConnectionSettings {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ConnectionSettings::Sqlite { .. } => ProviderKind::Sqlite,
            ConnectionSettings::Postgres(_) => ProviderKind::Postgres,
            ConnectionSettings::Mysql(_) => ProviderKind::Mysql,
        }
    }

    /// Whether connecting requires a password
    pub fn needs_password(&self) -> bool {
        !matches!(self, ConnectionSettings::Sqlite { .. })
    }
}

impl fmt::Display for ConnectionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionSettings::Sqlite { path } => write!(f, "{}", path.display()),
            ConnectionSettings::Postgres(s) | ConnectionSettings::Mysql(s) => {
                write!(f, "{}@{}:{}/{}", s.user, s.host, s.port, s.database)
            }
        }
    }
}

/// A named connection profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,

    #[serde(flatten)]
    pub connection: ConnectionSettings,
}

impl Profile {
    pub fn new(name: impl Into<String>, connection: ConnectionSettings) -> Self {
        Self {
            name: name.into(),
            connection,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.connection.kind()
    }
}

/// Directory-backed profile storage
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Store rooted at an explicit profiles directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the configuration directory (`<config_dir>/profiles`)
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(get_config_dir()?.join("profiles")))
    }

    /// Store under an explicit configuration directory
    pub fn in_config_dir(config_dir: &Path) -> Self {
        Self::new(config_dir.join("profiles"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{PROFILE_EXTENSION}")))
    }

    /// Write a profile, replacing any existing profile with the same name
    pub fn save(&self, profile: &Profile) -> Result<PathBuf> {
        let path = self.path_for(&profile.name)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, serde_yaml_ng::to_string(profile)?)?;
        debug!("Saved profile {} to {}", profile.name, path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Profile> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(Error::profile_not_found(name));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml_ng::from_str(&content)?)
    }

    /// All stored profiles, sorted by name
    pub fn list(&self) -> Result<Vec<Profile>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut profiles = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            profiles.push(serde_yaml_ng::from_str::<Profile>(&content)?);
        }

        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(profiles)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(Error::profile_not_found(name));
        }
        fs::remove_file(&path)?;
        debug!("Removed profile {}", name);
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.exists()).unwrap_or(false)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidProfileName {
            name: name.to_string(),
        })
    }
}
