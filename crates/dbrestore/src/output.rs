//! Terminal output utilities

use console::style;
use dbrestore_core::Error;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::{settings::Style, Table, Tabled};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner on stderr
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Render rows as a sharp-bordered table
pub fn table<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Print a value as pretty JSON on stdout
pub fn json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a failed command's error chain and a remediation hint
pub fn report_error(err: &anyhow::Error) {
    error(&err.to_string());
    for cause in err.chain().skip(1) {
        eprintln!("  {} {}", style("caused by:").dim(), cause);
    }
    if let Some(hint) = hint_for(err) {
        eprintln!("\n{} {}", style("hint:").cyan().bold(), hint);
    }
}

fn hint_for(err: &anyhow::Error) -> Option<String> {
    let core = err.chain().find_map(|c| c.downcast_ref::<Error>())?;
    let hint = match core {
        Error::ProfileNotFound { .. } => {
            "Run `dbrestore profile list` to see saved profiles, \
             or `dbrestore profile add` to create one"
        }
        Error::ManifestMissing { .. } => {
            "Run `dbrestore dump <profile>` first, \
             or point --in at a directory holding a complete dump"
        }
        Error::Connection { .. } => {
            "Check that the database exists and the profile's connection settings are correct"
        }
        Error::UnsupportedProvider { .. } => {
            "Only sqlite profiles can be dumped or restored by this build"
        }
        Error::UnsupportedDumpVersion { .. } => "Upgrade dbrestore to read this dump",
        _ => return None,
    };
    Some(hint.to_string())
}
