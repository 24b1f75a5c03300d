//! dbrestore CLI - dump a development database and restore it after re-migration
//!
//! This is the main entry point for the dbrestore command-line interface.

mod cli;
mod commands;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config_dir = cli.config_dir.as_deref();
    let outcome = match cli.command {
        Commands::Profile(cmd) => commands::profile::run(cmd, config_dir).await,
        Commands::Dump(args) => commands::dump::run(args, config_dir).await,
        Commands::Restore(args) => commands::restore::run(args, config_dir).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    // Drift warnings are printed by the commands themselves
    let default_level = if quiet {
        "off"
    } else {
        match verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
