//! Status command implementation

use anyhow::{Context, Result};
use sd_core::{MigrateStatus, StatusEntry, StatusSummary};
use serde::Serialize;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{load_project, print_table};

/// JSON view of one installed history row
#[derive(Debug, Serialize)]
struct HistoryJson<'a> {
    rank: i64,
    name: &'a str,
    installed_time: String,
    content_hash: String,
}

/// JSON view of one declared migration
#[derive(Debug, Serialize)]
struct MigrationJson<'a> {
    name: &'a str,
    content_hash: String,
}

#[derive(Debug, Serialize)]
struct StatusRowJson<'a> {
    rank: usize,
    status: MigrateStatus,
    history: Option<HistoryJson<'a>>,
    migration: Option<MigrationJson<'a>>,
}

#[derive(Debug, Serialize)]
struct StatusReportJson<'a> {
    healthy: bool,
    summary: &'a StatusSummary,
    migrations: Vec<StatusRowJson<'a>>,
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = project.migrator()?;
    let entries = migrator
        .status()
        .await
        .context("Failed to read schema history")?;
    let summary = StatusSummary::from_entries(&entries);

    match args.output {
        StatusOutput::Table => {
            if entries.is_empty() {
                println!("No migrations declared or installed.");
            } else {
                print_table(
                    &["RANK", "INSTALLED", "MIGRATION", "INSTALLED TIME", "STATUS"],
                    &table_rows(&entries),
                );
            }
            println!();
            println!("{}", help_tips(&summary));
        }
        StatusOutput::Json => {
            let json = serde_json::to_string_pretty(&json_report(&entries, &summary))
                .context("Failed to serialize to JSON")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn table_rows(entries: &[StatusEntry]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|entry| {
            let (rank, installed, time) = match &entry.history {
                Some(h) => (
                    h.rank().to_string(),
                    h.name().to_string(),
                    h.installed_time_display(),
                ),
                None => ("-".to_string(), String::new(), "-".to_string()),
            };
            let migration = entry
                .migration
                .as_ref()
                .map(|m| m.name().to_string())
                .unwrap_or_default();
            vec![rank, installed, migration, time, entry.status.to_string()]
        })
        .collect()
}

/// Remediation hints for every fault kind present, or "all is well".
fn help_tips(summary: &StatusSummary) -> String {
    if summary.is_healthy() {
        return "all is well".to_string();
    }

    let mut tips = Vec::new();
    if summary.missing > 0 {
        tips.push("to fix MIGRATION MISSING: restore the installed migrations that are no longer declared");
    }
    if summary.modified > 0 {
        tips.push("to fix MIGRATION MODIFIED: revert the installed migrations to their recorded content; never edit an installed migration, add a new one instead");
    }
    if summary.broken > 0 {
        tips.push("to fix SCHEMA BROKEN: repair the schema history table by hand so ranks run 1..N without gaps");
    }
    if summary.unknown > 0 {
        tips.push("UNKNOWN rows indicate a schema history the tool cannot interpret; inspect the history table");
    }
    let lines: Vec<String> = tips.iter().map(|tip| format!("  - {tip}")).collect();
    format!("Tips:\n{}", lines.join("\n"))
}

fn json_report<'a>(
    entries: &'a [StatusEntry],
    summary: &'a StatusSummary,
) -> StatusReportJson<'a> {
    let migrations = entries
        .iter()
        .map(|entry| StatusRowJson {
            rank: entry.rank,
            status: entry.status,
            history: entry.history.as_ref().map(|h| HistoryJson {
                rank: h.rank(),
                name: h.name(),
                installed_time: h.installed_time_display(),
                content_hash: h.migration().content_hash(),
            }),
            migration: entry.migration.as_ref().map(|m| MigrationJson {
                name: m.name(),
                content_hash: m.content_hash(),
            }),
        })
        .collect();

    StatusReportJson {
        healthy: summary.is_healthy(),
        summary,
        migrations,
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
