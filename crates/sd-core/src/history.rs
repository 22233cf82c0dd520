//! Persisted record of an applied migration.

use crate::migration::Migration;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Timestamp format used when storing and reading `installed_time`.
pub const INSTALLED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the schema history table.
///
/// `rank` is the 1-based install position. It is kept signed so that a
/// corrupted table (zero or negative ranks) can still be loaded and reported
/// as broken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaHistory {
    #[serde(flatten)]
    migration: Migration,
    rank: i64,
    installed_time: NaiveDateTime,
}

impl SchemaHistory {
    pub fn new(migration: Migration, rank: i64, installed_time: NaiveDateTime) -> Self {
        Self {
            migration,
            rank,
            installed_time,
        }
    }

    /// The migration as it was when installed.
    pub fn migration(&self) -> &Migration {
        &self.migration
    }

    pub fn name(&self) -> &str {
        self.migration.name()
    }

    pub fn content(&self) -> &str {
        self.migration.content()
    }

    pub fn rank(&self) -> i64 {
        self.rank
    }

    pub fn installed_time(&self) -> NaiveDateTime {
        self.installed_time
    }

    /// `installed_time` rendered with [`INSTALLED_TIME_FORMAT`].
    pub fn installed_time_display(&self) -> String {
        self.installed_time.format(INSTALLED_TIME_FORMAT).to_string()
    }

    /// Whether this entry records exactly `migration` (name and content).
    pub fn matches(&self, migration: &Migration) -> bool {
        self.migration.matches(migration)
    }
}
