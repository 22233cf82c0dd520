//! Install command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, InstallArgs};
use crate::commands::common::load_project;

/// Execute the install command
pub(crate) async fn execute(args: &InstallArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = project.migrator()?;

    if args.dry_run {
        let pending = migrator
            .pending()
            .await
            .context("Schema history check failed")?;
        if pending.is_empty() {
            println!("Dry run - schema is up to date, nothing to install");
            return Ok(());
        }

        let base = migrator.migrations().len() - pending.len();
        println!("Dry run - would install {} migrations:", pending.len());
        for (offset, migration) in pending.iter().enumerate() {
            println!("  {:>4}  {}", base + offset + 1, migration.name());
        }
        return Ok(());
    }

    let report = migrator.install().await.context("Install failed")?;
    if report.applied.is_empty() {
        println!(
            "Schema is up to date ({} migrations installed)",
            report.base_rank
        );
        return Ok(());
    }

    for (offset, name) in report.applied.iter().enumerate() {
        println!("  {:>4}  {}", report.base_rank + offset + 1, name);
    }
    println!(
        "\nInstalled {} migrations into {}",
        report.applied.len(),
        project.database_path
    );
    Ok(())
}

#[cfg(test)]
#[path = "install_test.rs"]
mod tests;
