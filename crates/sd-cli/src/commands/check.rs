//! Check command implementation

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use crate::commands::common::load_project;

/// Execute the check command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let migrator = project.migrator()?;

    let pending = migrator
        .pending()
        .await
        .context("Schema history check failed")?;

    let declared = migrator.migrations().len();
    println!(
        "OK: {} migrations declared, {} installed, {} pending",
        declared,
        declared - pending.len(),
        pending.len()
    );
    Ok(())
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
