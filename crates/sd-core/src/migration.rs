//! Migration definitions and version ordering.

use crate::version::Version;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// A named unit of schema change.
///
/// Immutable once constructed. Equality compares `name` and `content`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Migration {
    name: String,
    content: String,
}

impl Migration {
    /// Create a migration from its name and the SQL to execute.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Unique migration name, usually the source filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// SQL payload executed on install.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// SHA-256 hex digest of the content.
    ///
    /// Diagnostic only; consistency checks compare name and content directly.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Whether `other` has the same name and content.
    pub fn matches(&self, other: &Migration) -> bool {
        self.name == other.name && self.content == other.content
    }
}

/// A migration paired with its parsed version, used only while sorting a
/// discovered batch.
#[derive(Debug, Clone)]
pub struct SortableMigration {
    pub migration: Migration,
    pub version: Version,
}

impl SortableMigration {
    pub fn new(migration: Migration, version: Version) -> Self {
        Self { migration, version }
    }
}

/// Sort a batch by version and return the canonical migration sequence.
///
/// The sort is stable: migrations with equal versions keep their input order.
pub fn sort_migrations(mut batch: Vec<SortableMigration>) -> Vec<Migration> {
    batch.sort_by(|a, b| a.version.cmp(&b.version));
    batch.into_iter().map(|s| s.migration).collect()
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
