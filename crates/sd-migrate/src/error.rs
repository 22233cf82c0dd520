//! Error types for the migration engine.

use sd_core::CoreError;
use sd_db::DbError;
use thiserror::Error;

/// Migration engine errors.
#[derive(Error, Debug)]
pub enum MigrateError {
    /// The schema history table could not be created or read (M001).
    #[error("[M001] Failed to initialize schema history table '{table}': {source}")]
    InitializeFailed {
        table: String,
        #[source]
        source: DbError,
    },

    /// A persisted history row could not be decoded (M002).
    #[error("[M002] Malformed schema history row: {0}")]
    HistoryDecode(String),

    /// Executing a migration failed (M003).
    #[error("[M003] Migration '{name}' failed: {source}")]
    ExecuteFailed {
        name: String,
        #[source]
        source: DbError,
    },

    /// Recording an executed migration failed (M004).
    ///
    /// The migration's statements already ran; the database needs manual
    /// inspection.
    #[error("[M004] Migration '{name}' was executed but could not be recorded at rank {rank}: {source}")]
    RecordFailed {
        name: String,
        rank: i64,
        #[source]
        source: DbError,
    },

    /// Install applied migrations but the connection failed to close (M005).
    #[error("[M005] Installed {} but closing the connection failed: {source}", applied.join(", "))]
    CloseAfterInstall {
        applied: Vec<String>,
        #[source]
        source: DbError,
    },

    /// Version, consistency or configuration error from sd-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage error.
    #[error(transparent)]
    Database(#[from] DbError),
}

impl MigrateError {
    /// The underlying consistency fault, if this is one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            MigrateError::Core(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for [`MigrateError`].
pub type MigrateResult<T> = Result<T, MigrateError>;
