//! Restore command

use anyhow::{Context, Result};
use camino::Utf8Path;
use dbrestore_backup::{perform_restore, read_manifest, RestoreResult};
use tabled::Tabled;

use super::{connect, load_profile};
use crate::cli::RestoreArgs;
use crate::output;

#[derive(Tabled)]
struct RestoreRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Strategy")]
    strategy: String,
}

pub async fn run(args: RestoreArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let profile = load_profile(config_dir, &args.profile)?;
    let dir = args.input.as_std_path();

    let manifest = read_manifest(dir)
        .await
        .with_context(|| format!("Cannot restore from {}", args.input))?;

    if !args.json {
        output::header("Restore Database");
        output::kv("Profile", &profile.name);
        output::kv("Connection", &profile.connection.to_string());
        output::kv("Dump", args.input.as_str());
        output::kv("Dumped from", &manifest.provider);
        output::kv("Taken at", &manifest.timestamp);
        output::kv("Tables", &manifest.tables.len().to_string());
        println!();
    }

    let provider = connect(&profile, !args.json)?;

    let spinner = (!args.json).then(|| output::spinner("Restoring tables..."));
    let result = perform_restore(provider.as_ref(), dir).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = result.context("Restore failed")?;

    if args.json {
        return output::json(&result);
    }

    println!("{}", output::table(summary_rows(&result)));
    for warning in &result.warnings {
        output::warning(&warning.to_string());
    }
    output::success(&format!(
        "Restored {} tables ({} rows)",
        result.tables.len(),
        result.total_rows
    ));
    Ok(())
}

fn summary_rows(result: &RestoreResult) -> Vec<RestoreRow> {
    let mut rows: Vec<RestoreRow> = result
        .tables
        .iter()
        .map(|t| RestoreRow {
            table: t.table.clone(),
            rows: t.row_count,
            strategy: t.strategy.to_string(),
        })
        .collect();
    rows.push(RestoreRow {
        table: "TOTAL".to_string(),
        rows: result.total_rows,
        strategy: String::new(),
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbrestore_backup::TableOutcome;
    use dbrestore_core::RestoreStrategy;

    #[test]
    fn test_summary_rows() {
        let result = RestoreResult {
            tables: vec![TableOutcome {
                table: "audit_log".into(),
                row_count: 3,
                strategy: RestoreStrategy::Truncate,
            }],
            total_rows: 3,
            warnings: vec![],
        };

        let rows = summary_rows(&result);
        assert_eq!(rows[0].strategy, "truncate");
        assert_eq!(rows[1].table, "TOTAL");
    }
}
