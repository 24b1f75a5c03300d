//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dbrestore_core::constants::DEFAULT_DUMP_DIR;
use dbrestore_core::ProviderKind;

/// dbrestore - keep development data across destructive schema migrations
#[derive(Parser, Debug)]
#[command(name = "dbrestore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding saved profiles
    #[arg(long, global = true, env = "DBRESTORE_CONFIG_DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connection profile management
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Dump every table of a database to JSON files
    Dump(DumpArgs),

    /// Restore a dump into a (re-migrated) database
    Restore(RestoreArgs),
}

// Profile commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Save a connection profile
    Add(ProfileAddArgs),

    /// List saved profiles
    List(ProfileListArgs),

    /// Delete a saved profile
    Remove(ProfileRemoveArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProviderArg {
    Sqlite,
    Postgres,
    Mysql,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Sqlite => ProviderKind::Sqlite,
            ProviderArg::Postgres => ProviderKind::Postgres,
            ProviderArg::Mysql => ProviderKind::Mysql,
        }
    }
}

#[derive(Args, Debug)]
pub struct ProfileAddArgs {
    /// Profile name
    pub name: String,

    /// Database backend
    #[arg(short, long, value_enum)]
    pub provider: ProviderArg,

    /// Database file (sqlite)
    #[arg(long, required_if_eq("provider", "sqlite"))]
    pub path: Option<Utf8PathBuf>,

    /// Server host
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Server port [default: 5432 for postgres, 3306 for mysql]
    #[arg(long)]
    pub port: Option<u16>,

    /// Database name
    #[arg(long)]
    pub database: Option<String>,

    /// User name [default: postgres for postgres, root for mysql]
    #[arg(long)]
    pub user: Option<String>,

    /// Replace an existing profile with the same name
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ProfileListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ProfileRemoveArgs {
    /// Profile name
    pub name: String,
}

/// What to do with a complete dump already present in the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnExisting {
    /// Pack the existing dump into a tar.gz archive first
    Archive,
    /// Write over the existing dump
    Overwrite,
    /// Leave the existing dump alone and stop
    Cancel,
}

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Profile to dump
    pub profile: String,

    /// Output directory
    #[arg(short, long = "out", default_value = DEFAULT_DUMP_DIR)]
    pub out: Utf8PathBuf,

    /// Action when a complete dump already exists (prompts when omitted)
    #[arg(long, value_enum)]
    pub on_existing: Option<OnExisting>,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Profile to restore into
    pub profile: String,

    /// Dump directory
    #[arg(short, long = "in", default_value = DEFAULT_DUMP_DIR)]
    pub input: Utf8PathBuf,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}
