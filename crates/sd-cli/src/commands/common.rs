//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sd_core::{migrations_from_dir, Config, DbType, HistoryTableName};
use sd_db::{Database, DuckDbBackend};
use sd_migrate::Migrator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Everything a command needs after config, target and flag overrides.
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) migrations_dir: PathBuf,
    pub(crate) database_path: String,
    pub(crate) history_table: HistoryTableName,
    db: Arc<dyn Database>,
}

impl Project {
    /// Migrator with no declared migrations, for history-only operations.
    pub(crate) fn history_migrator(&self) -> Migrator {
        Migrator::new(Arc::clone(&self.db), self.history_table.clone(), Vec::new())
    }

    /// Discover migrations on disk and build a migrator over them.
    pub(crate) fn migrator(&self) -> Result<Migrator> {
        let migrations = migrations_from_dir(&self.migrations_dir).with_context(|| {
            format!(
                "Failed to load migrations from {}",
                self.migrations_dir.display()
            )
        })?;
        Ok(Migrator::new(
            Arc::clone(&self.db),
            self.history_table.clone(),
            migrations,
        ))
    }
}

/// Load the project configuration and open the configured database.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = global.project_dir.clone();

    let config = match &global.config {
        Some(path) => {
            let path = resolve_path(&root, path);
            Config::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => Config::load_from_dir(&root).context("Failed to load project config")?,
    };

    let mut resolved = config.resolve_target(global.target.as_deref())?;
    if let Some(path) = &global.database {
        resolved.database.path = path.clone();
    }
    if let Some(name) = &global.history_table {
        resolved.history_table = HistoryTableName::try_new(name.as_str())?;
    }

    let migrations_dir = match &global.migrations {
        Some(dir) => resolve_path(&root, dir),
        None => config.migrations_path_absolute(&root),
    };

    let database_path = resolve_db_path(&root, &resolved.database.path);
    let db: Arc<dyn Database> = match resolved.database.db_type {
        DbType::DuckDb => Arc::new(
            DuckDbBackend::new(&database_path)
                .with_context(|| format!("Failed to open database: {database_path}"))?,
        ),
    };
    log::debug!(
        "Using {} database {} with history table {}",
        db.db_type(),
        database_path,
        resolved.history_table
    );

    Ok(Project {
        root,
        migrations_dir,
        database_path,
        history_table: resolved.history_table,
        db,
    })
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Relative database paths are taken from the project directory.
fn resolve_db_path(root: &Path, path: &str) -> String {
    if path == ":memory:" {
        return path.to_string();
    }
    resolve_path(root, Path::new(path)).display().to_string()
}

/// Calculate column widths for table output
fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.len());
            }
        }
    }
    widths
}

/// Render a simple left-aligned table with a dashed header separator.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = calculate_column_widths(headers, rows);
    let render = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| format!("{:<width$}", h, width = w))
            .collect(),
    ));
    lines.push(render(widths.iter().map(|&w| "-".repeat(w)).collect()));
    for row in rows {
        lines.push(render(
            row.iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
                .collect(),
        ));
    }
    lines.join("\n")
}

/// Print a table to stdout
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    println!("{}", format_table(headers, rows));
}

/// Global args pointing at `project_dir` with no overrides.
#[cfg(test)]
pub(crate) fn test_global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.to_path_buf(),
        config: None,
        target: None,
        database: None,
        history_table: None,
        migrations: None,
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
