//! Error types for sd-core

use std::fmt;
use thiserror::Error;

/// Core error type for Sediment
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Unknown target name
    #[error("[E003] Unknown target '{name}'. Available targets: {available}")]
    UnknownTarget { name: String, available: String },

    /// E004: Version string could not be parsed
    #[error("[E004] Invalid migration version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    /// E005: Migration source directory not found
    #[error("[E005] Migration directory not found: {path}")]
    MigrationSourceNotFound { path: String },

    /// E006: Schema history table name is not a valid identifier
    #[error("[E006] Invalid schema history table name '{name}': {reason}")]
    InvalidTableName { name: String, reason: String },

    /// E007: Declared migrations share a name
    #[error("[E007] Duplicated migration name detected: {}", names.join(", "))]
    DuplicatedMigrationName { names: Vec<String> },

    /// E008: Installed ranks are not dense from 1
    #[error("[E008] Broken schema history detected: expected rank {expected} at position {position}, found {found}")]
    BrokenSchemaHistory {
        position: usize,
        expected: i64,
        found: i64,
    },

    /// E009: Declared migrations no longer agree with installed history
    #[error("[E009] Invalid migrations ({kind})")]
    InvalidMigrations { kind: InvalidMigrationKind },

    /// E010: IO error with file path context
    #[error("[E010] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E011: Config YAML parse error
    #[error("[E011] Failed to parse config: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Sub-kind of [`CoreError::InvalidMigrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMigrationKind {
    /// More migrations are installed than currently declared.
    Missing { installed: usize, declared: usize },

    /// An installed migration's name or content differs from the declared one
    /// at the same position.
    Modified {
        rank: i64,
        installed_name: String,
        declared_name: String,
    },
}

impl fmt::Display for InvalidMigrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidMigrationKind::Missing {
                installed,
                declared,
            } => write!(
                f,
                "missing: {installed} installed but only {declared} declared"
            ),
            InvalidMigrationKind::Modified {
                rank,
                installed_name,
                declared_name,
            } if installed_name == declared_name => {
                write!(f, "modified: content of '{installed_name}' at rank {rank} changed")
            }
            InvalidMigrationKind::Modified {
                rank,
                installed_name,
                declared_name,
            } => write!(
                f,
                "modified: rank {rank} installed as '{installed_name}' but declared as '{declared_name}'"
            ),
        }
    }
}

impl CoreError {
    /// Whether this error is one of the history/declaration consistency faults.
    pub fn is_consistency_fault(&self) -> bool {
        matches!(
            self,
            CoreError::DuplicatedMigrationName { .. }
                | CoreError::BrokenSchemaHistory { .. }
                | CoreError::InvalidMigrations { .. }
        )
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
