//! Profile management commands
//!
//! - add: save a connection profile
//! - list: show saved profiles
//! - remove: delete a saved profile

use anyhow::{bail, Context, Result};
use camino::Utf8Path;
use dbrestore_core::config::ServerSettings;
use dbrestore_core::{ConnectionSettings, Profile, ProviderKind};
use tabled::Tabled;

use super::profile_store;
use crate::cli::{ProfileAddArgs, ProfileCommands, ProfileListArgs, ProfileRemoveArgs};
use crate::output;

/// Main entry point for profile subcommands
pub async fn run(cmd: ProfileCommands, config_dir: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ProfileCommands::Add(args) => add(args, config_dir),
        ProfileCommands::List(args) => list(args, config_dir),
        ProfileCommands::Remove(args) => remove(args, config_dir),
    }
}

fn add(args: ProfileAddArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let store = profile_store(config_dir)?;

    if store.exists(&args.name) && !args.force {
        bail!(
            "Profile \"{}\" already exists (use --force to replace it)",
            args.name
        );
    }

    let profile = Profile::new(args.name.clone(), connection_settings(&args)?);
    let path = store
        .save(&profile)
        .with_context(|| format!("Failed to save profile \"{}\"", args.name))?;

    output::success(&format!("Saved profile \"{}\"", profile.name));
    output::kv("Provider", profile.provider().as_str());
    output::kv("Connection", &profile.connection.to_string());
    output::kv("File", &path.display().to_string());
    if profile.connection.needs_password() {
        output::warning(
            "Passwords are never stored; this build can only dump and restore sqlite profiles",
        );
    }
    Ok(())
}

fn connection_settings(args: &ProfileAddArgs) -> Result<ConnectionSettings> {
    let kind = ProviderKind::from(args.provider);
    let Some((default_port, default_user)) = kind.server_defaults() else {
        let Some(path) = &args.path else {
            bail!("--path is required for sqlite profiles");
        };
        return Ok(ConnectionSettings::Sqlite {
            path: path.clone().into_std_path_buf(),
        });
    };

    let Some(database) = args.database.clone() else {
        bail!("--database is required for {kind} profiles");
    };
    let settings = ServerSettings {
        host: args.host.clone(),
        port: args.port.unwrap_or(default_port),
        database,
        user: args.user.clone().unwrap_or_else(|| default_user.to_string()),
    };

    Ok(match kind {
        ProviderKind::Postgres => ConnectionSettings::Postgres(settings),
        _ => ConnectionSettings::Mysql(settings),
    })
}

#[derive(Tabled)]
struct ProfileRow {
    #[tabled(rename = "Profile")]
    name: String,
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Connection")]
    connection: String,
}

fn list(args: ProfileListArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let profiles = profile_store(config_dir)?
        .list()
        .context("Failed to read saved profiles")?;

    if args.json {
        return output::json(&profiles);
    }

    if profiles.is_empty() {
        output::info("No profiles saved yet. Create one with `dbrestore profile add`");
        return Ok(());
    }

    let rows: Vec<ProfileRow> = profiles
        .iter()
        .map(|p| ProfileRow {
            name: p.name.clone(),
            provider: p.provider().to_string(),
            connection: p.connection.to_string(),
        })
        .collect();
    println!("{}", output::table(rows));
    Ok(())
}

fn remove(args: ProfileRemoveArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    profile_store(config_dir)?
        .delete(&args.name)
        .with_context(|| format!("Failed to remove profile \"{}\"", args.name))?;
    output::success(&format!("Removed profile \"{}\"", args.name));
    Ok(())
}
