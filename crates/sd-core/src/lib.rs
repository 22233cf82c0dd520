//! sd-core - Core library for Sediment
//!
//! Versions, migrations, schema history records, the consistency checker, the
//! status classifier, migration discovery and project configuration. Nothing
//! in this crate talks to a database.

pub mod check;
pub mod config;
pub mod error;
pub mod history;
pub mod migration;
pub mod source;
pub mod status;
pub mod table_name;
pub mod version;

pub use check::{check_consistency, check_duplicate_names, pending_migrations};
pub use config::{Config, DatabaseConfig, DbType, ResolvedTarget};
pub use error::{CoreError, CoreResult, InvalidMigrationKind};
pub use history::SchemaHistory;
pub use migration::{sort_migrations, Migration, SortableMigration};
pub use source::{migrations_from_dir, migrations_from_embedded};
pub use status::{classify, MigrateStatus, StatusEntry, StatusSummary};
pub use table_name::{HistoryTableName, DEFAULT_SCHEMA_HISTORY_TABLE};
pub use version::Version;
