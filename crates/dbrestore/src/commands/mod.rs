//! CLI command implementations

pub mod dump;
pub mod profile;
pub mod restore;

use anyhow::{Context, Result};
use camino::Utf8Path;
use dbrestore_core::{Profile, ProfileStore};
use dbrestore_providers::{create_provider, DatabaseProvider};

use crate::output;

/// Profile store rooted at `--config-dir`, or the default location
pub(crate) fn profile_store(config_dir: Option<&Utf8Path>) -> Result<ProfileStore> {
    match config_dir {
        Some(dir) => Ok(ProfileStore::in_config_dir(dir.as_std_path())),
        None => ProfileStore::open_default().context("Failed to locate the config directory"),
    }
}

pub(crate) fn load_profile(config_dir: Option<&Utf8Path>, name: &str) -> Result<Profile> {
    profile_store(config_dir)?
        .load(name)
        .with_context(|| format!("Failed to load profile \"{name}\""))
}

/// Opens a session for `profile`
pub(crate) fn connect(profile: &Profile, show_progress: bool) -> Result<Box<dyn DatabaseProvider>> {
    let spinner = show_progress
        .then(|| output::spinner(&format!("Connecting to {}...", profile.connection)));

    let provider = create_provider(&profile.connection);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    provider.with_context(|| format!("Failed to connect using profile \"{}\"", profile.name))
}
