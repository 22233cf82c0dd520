//! sd-migrate - Migration engine for Sediment
//!
//! [`Migrator`] checks a declared migration set against the schema history
//! table, reports per-rank status, and installs pending migrations one at a
//! time through an [`sd_db::Database`].

pub mod error;
pub mod history_store;
pub mod migrator;

pub use error::{MigrateError, MigrateResult};
pub use migrator::{InstallReport, Migrator};
