//! Init command implementation - prepares a project for migrations

use anyhow::{Context, Result};
use std::fs;

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the init command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    println!("Initializing sediment project in {}", project.root.display());

    if !project.migrations_dir.exists() {
        fs::create_dir_all(&project.migrations_dir).with_context(|| {
            format!(
                "Failed to create directory: {}",
                project.migrations_dir.display()
            )
        })?;
        println!(
            "Created migrations directory: {}",
            project.migrations_dir.display()
        );
    }

    project
        .history_migrator()
        .init_history_table()
        .await
        .context("Failed to initialize schema history")?;

    println!(
        "Schema history table {} ready in {}",
        project.history_table, project.database_path
    );
    Ok(())
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
