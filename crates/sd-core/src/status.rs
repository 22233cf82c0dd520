//! Per-rank status of declared migrations against installed history.
//!
//! Unlike [`crate::check`], classification tolerates a broken history so that
//! operators can see where it broke.

use crate::history::SchemaHistory;
use crate::migration::Migration;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Status of one rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrateStatus {
    /// Fallback for combinations the classifier does not expect.
    Unknown,
    /// History entry matches the declared migration.
    Installed,
    /// Declared migration beyond the highest installed rank.
    ReadyToInstall,
    /// Installed rank with no declared migration at this position.
    MigrationMissing,
    /// History entry differs from the declared migration.
    MigrationModified,
    /// Hole in the installed ranks.
    BrokenSchemaHistory,
}

impl MigrateStatus {
    /// Upper-case label used in tabular output.
    pub fn label(self) -> &'static str {
        match self {
            MigrateStatus::Unknown => "UNKNOWN",
            MigrateStatus::Installed => "INSTALLED",
            MigrateStatus::ReadyToInstall => "READY TO INSTALL",
            MigrateStatus::MigrationMissing => "MIGRATION MISSING",
            MigrateStatus::MigrationModified => "MIGRATION MODIFIED",
            MigrateStatus::BrokenSchemaHistory => "SCHEMA BROKEN",
        }
    }

    /// Whether this status blocks installation.
    pub fn is_fault(self) -> bool {
        !matches!(self, MigrateStatus::Installed | MigrateStatus::ReadyToInstall)
    }
}

impl fmt::Display for MigrateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status of a single rank, with whatever is known on either side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// 1-based rank, equal to declared position + 1.
    pub rank: usize,
    pub history: Option<SchemaHistory>,
    pub migration: Option<Migration>,
    pub status: MigrateStatus,
}

/// Classify every rank in `[1, max(migrations.len(), highest installed rank)]`.
///
/// Empty ranks are only listed up to `migrations.len() + history.len()`.
/// Installed ranks above that bound get one row each, so a single corrupt
/// rank cannot blow up the report.
pub fn classify(migrations: &[Migration], history: &[SchemaHistory]) -> Vec<StatusEntry> {
    let mut by_rank: HashMap<i64, &SchemaHistory> = HashMap::with_capacity(history.len());
    let mut max_rank: i64 = 0;
    for entry in history {
        max_rank = max_rank.max(entry.rank());
        by_rank.insert(entry.rank(), entry);
    }

    let max_rank = usize::try_from(max_rank).unwrap_or(usize::MAX);
    let contiguous = max_rank
        .min(migrations.len() + history.len())
        .max(migrations.len());

    let mut outliers: Vec<(usize, &SchemaHistory)> = by_rank
        .iter()
        .filter_map(|(&rank, &entry)| {
            let rank = usize::try_from(rank).ok()?;
            (rank > contiguous).then_some((rank, entry))
        })
        .collect();
    outliers.sort_by_key(|(rank, _)| *rank);

    let entry_at = |rank: usize, installed: Option<&SchemaHistory>| {
        let migration = migrations.get(rank - 1);
        StatusEntry {
            rank,
            history: installed.cloned(),
            migration: migration.cloned(),
            status: status_at(rank, max_rank, installed, migration),
        }
    };

    let mut entries: Vec<StatusEntry> = (1..=contiguous)
        .map(|rank| entry_at(rank, by_rank.get(&(rank as i64)).copied()))
        .collect();
    entries.extend(
        outliers
            .into_iter()
            .map(|(rank, entry)| entry_at(rank, Some(entry))),
    );
    entries
}

fn status_at(
    rank: usize,
    max_rank: usize,
    installed: Option<&SchemaHistory>,
    migration: Option<&Migration>,
) -> MigrateStatus {
    match (rank <= max_rank, installed, migration) {
        (true, Some(entry), Some(migration)) if entry.matches(migration) => {
            MigrateStatus::Installed
        }
        (true, Some(_), Some(_)) => MigrateStatus::MigrationModified,
        (true, None, Some(_)) => MigrateStatus::BrokenSchemaHistory,
        (true, _, None) => MigrateStatus::MigrationMissing,
        (false, _, Some(_)) => MigrateStatus::ReadyToInstall,
        (false, _, None) => MigrateStatus::Unknown,
    }
}

/// Counts per status over a classified report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub installed: usize,
    pub ready_to_install: usize,
    pub missing: usize,
    pub modified: usize,
    pub broken: usize,
    pub unknown: usize,
}

impl StatusSummary {
    pub fn from_entries(entries: &[StatusEntry]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            match entry.status {
                MigrateStatus::Installed => summary.installed += 1,
                MigrateStatus::ReadyToInstall => summary.ready_to_install += 1,
                MigrateStatus::MigrationMissing => summary.missing += 1,
                MigrateStatus::MigrationModified => summary.modified += 1,
                MigrateStatus::BrokenSchemaHistory => summary.broken += 1,
                MigrateStatus::Unknown => summary.unknown += 1,
            }
        }
        summary
    }

    /// No missing, modified, broken or unknown rows.
    pub fn is_healthy(&self) -> bool {
        self.missing == 0 && self.modified == 0 && self.broken == 0 && self.unknown == 0
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
