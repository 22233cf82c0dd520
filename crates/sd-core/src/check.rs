//! Reconciles declared migrations against the installed schema history.
//!
//! Checks run in a fixed order and stop at the first fault:
//! duplicated name → broken history → missing migration → modified migration.

use crate::error::{CoreError, CoreResult, InvalidMigrationKind};
use crate::history::SchemaHistory;
use crate::migration::Migration;
use std::collections::HashMap;

/// Names declared more than once, each reported once, in order of first repeat.
pub fn find_duplicate_names(migrations: &[Migration]) -> Vec<String> {
    let mut seen: HashMap<&str, bool> = HashMap::with_capacity(migrations.len());
    let mut duplicates = Vec::new();

    for migration in migrations {
        match seen.get_mut(migration.name()) {
            None => {
                seen.insert(migration.name(), false);
            }
            Some(reported) if !*reported => {
                *reported = true;
                duplicates.push(migration.name().to_string());
            }
            Some(_) => {}
        }
    }
    duplicates
}

/// Fail with [`CoreError::DuplicatedMigrationName`] if any name repeats.
///
/// Needs no history, so callers run it before touching storage.
pub fn check_duplicate_names(migrations: &[Migration]) -> CoreResult<()> {
    let names = find_duplicate_names(migrations);
    if names.is_empty() {
        Ok(())
    } else {
        Err(CoreError::DuplicatedMigrationName { names })
    }
}

/// Ranks must be exactly `1..=len` in order.
pub fn check_history_ranks(history: &[SchemaHistory]) -> CoreResult<()> {
    for (position, entry) in history.iter().enumerate() {
        let expected = position as i64 + 1;
        if entry.rank() != expected {
            return Err(CoreError::BrokenSchemaHistory {
                position,
                expected,
                found: entry.rank(),
            });
        }
    }
    Ok(())
}

/// Run the full consistency check.
///
/// `migrations` must be sorted by version and `history` by rank ascending.
/// `Ok(())` means `history` is a position-for-position prefix of `migrations`.
pub fn check_consistency(migrations: &[Migration], history: &[SchemaHistory]) -> CoreResult<()> {
    check_duplicate_names(migrations)?;
    check_history_ranks(history)?;

    if history.len() > migrations.len() {
        return Err(CoreError::InvalidMigrations {
            kind: InvalidMigrationKind::Missing {
                installed: history.len(),
                declared: migrations.len(),
            },
        });
    }

    for (entry, migration) in history.iter().zip(migrations) {
        if !entry.matches(migration) {
            return Err(CoreError::InvalidMigrations {
                kind: InvalidMigrationKind::Modified {
                    rank: entry.rank(),
                    installed_name: entry.name().to_string(),
                    declared_name: migration.name().to_string(),
                },
            });
        }
    }

    Ok(())
}

/// Declared migrations beyond the installed prefix, in install order.
///
/// Only meaningful once [`check_consistency`] has passed.
pub fn pending_migrations<'a>(
    migrations: &'a [Migration],
    history: &[SchemaHistory],
) -> &'a [Migration] {
    migrations.get(history.len()..).unwrap_or(&[])
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
