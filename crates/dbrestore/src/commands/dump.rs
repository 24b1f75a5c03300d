//! Dump command

use anyhow::{Context, Result};
use camino::Utf8Path;
use dbrestore_backup::{archive_dump, dump_exists, perform_dump, DumpResult};
use dialoguer::Select;
use tabled::Tabled;

use super::{connect, load_profile};
use crate::cli::{DumpArgs, OnExisting};
use crate::output;

#[derive(Tabled)]
struct DumpRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: usize,
}

pub async fn run(args: DumpArgs, config_dir: Option<&Utf8Path>) -> Result<()> {
    let profile = load_profile(config_dir, &args.profile)?;
    let dir = args.out.as_std_path();

    if !args.json {
        output::header("Dump Database");
        output::kv("Profile", &profile.name);
        output::kv("Connection", &profile.connection.to_string());
        output::kv("Output", args.out.as_str());
        println!();
    }

    if dump_exists(dir) {
        match resolve_existing(&args)? {
            OnExisting::Cancel => {
                output::info("Dump cancelled, existing dump left untouched");
                return Ok(());
            }
            OnExisting::Archive => {
                let archive = archive_dump(dir)
                    .await
                    .context("Failed to archive the existing dump")?;
                if !args.json {
                    output::success(&format!("Archived existing dump to {}", archive.display()));
                }
            }
            OnExisting::Overwrite => {
                if !args.json {
                    output::warning("Overwriting existing dump");
                }
            }
        }
    }

    let provider = connect(&profile, !args.json)?;

    let spinner = (!args.json).then(|| output::spinner("Dumping tables..."));
    let result = perform_dump(provider.as_ref(), profile.provider().as_str(), dir).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let result = result.context("Dump failed")?;

    if args.json {
        return output::json(&result);
    }

    println!("{}", output::table(summary_rows(&result)));
    output::success(&format!(
        "Dumped {} tables ({} rows) to {}",
        result.tables.len(),
        result.total_rows,
        args.out
    ));
    Ok(())
}

/// `--on-existing`, or ask the user
fn resolve_existing(args: &DumpArgs) -> Result<OnExisting> {
    if let Some(action) = args.on_existing {
        return Ok(action);
    }

    output::warning(&format!("A complete dump already exists in {}", args.out));
    let choices = [
        (OnExisting::Archive, "Archive it and create a new dump"),
        (OnExisting::Overwrite, "Overwrite it"),
        (OnExisting::Cancel, "Cancel"),
    ];
    let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();

    let selection = Select::new()
        .with_prompt("What should happen to the existing dump?")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(choices[selection].0)
}

fn summary_rows(result: &DumpResult) -> Vec<DumpRow> {
    let mut rows: Vec<DumpRow> = result
        .tables
        .iter()
        .map(|t| DumpRow {
            table: t.table.clone(),
            rows: t.row_count,
        })
        .collect();
    rows.push(DumpRow {
        table: "TOTAL".to_string(),
        rows: result.total_rows,
    });
    rows
}
