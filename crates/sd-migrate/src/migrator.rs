//! The migration engine.
//!
//! Every operation opens one connection, runs to completion or first error,
//! and closes the connection before returning.

use crate::error::{MigrateError, MigrateResult};
use crate::history_store;
use chrono::{Local, NaiveDateTime, SubsecRound};
use sd_core::check::{check_consistency, check_duplicate_names, pending_migrations};
use sd_core::status::{classify, StatusEntry};
use sd_core::{HistoryTableName, Migration, SchemaHistory};
use sd_db::{Connection, Database, DbResult};
use std::sync::Arc;

/// Outcome of a successful install run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// History length observed before applying anything.
    pub base_rank: usize,
    /// Names of the migrations applied by this run, in order.
    pub applied: Vec<String>,
}

/// Applies a declared, version-sorted migration set to one database.
pub struct Migrator {
    db: Arc<dyn Database>,
    history_table: HistoryTableName,
    migrations: Vec<Migration>,
}

impl Migrator {
    /// `migrations` must already be in install order (sorted by version).
    pub fn new(
        db: Arc<dyn Database>,
        history_table: HistoryTableName,
        migrations: Vec<Migration>,
    ) -> Self {
        Self {
            db,
            history_table,
            migrations,
        }
    }

    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    pub fn history_table(&self) -> &HistoryTableName {
        &self.history_table
    }

    /// Create the schema history table if it does not exist.
    pub async fn init_history_table(&self) -> MigrateResult<()> {
        let mut conn = self.db.connect().await?;
        let result = history_store::ensure_table(conn.as_mut(), &self.history_table).await;
        finish(conn, result)
    }

    /// Installed history ordered by rank.
    pub async fn history(&self) -> MigrateResult<Vec<SchemaHistory>> {
        let mut conn = self.db.connect().await?;
        let result = self.load_history(conn.as_mut()).await;
        finish(conn, result)
    }

    /// Run the full consistency check without changing anything but the
    /// (idempotent) history table creation.
    pub async fn check(&self) -> MigrateResult<()> {
        self.pending().await.map(|_| ())
    }

    /// Check consistency and return the migrations an install would apply.
    pub async fn pending(&self) -> MigrateResult<Vec<Migration>> {
        check_duplicate_names(&self.migrations)?;

        let mut conn = self.db.connect().await?;
        let result = self.checked_history(conn.as_mut()).await;
        let history = finish(conn, result)?;
        Ok(pending_migrations(&self.migrations, &history).to_vec())
    }

    /// Per-rank status for reporting. Tolerates a broken history.
    pub async fn status(&self) -> MigrateResult<Vec<StatusEntry>> {
        let history = self.history().await?;
        Ok(classify(&self.migrations, &history))
    }

    /// Apply every pending migration in order, recording each one.
    ///
    /// Stops at the first execution or recording error. Migrations applied
    /// before the failure stay applied and recorded.
    pub async fn install(&self) -> MigrateResult<InstallReport> {
        check_duplicate_names(&self.migrations)?;

        let mut conn = self.db.connect().await?;
        let result = self.install_on(conn.as_mut()).await;
        match (result, conn.close()) {
            (Ok(report), Err(source)) if !report.applied.is_empty() => {
                log::warn!(
                    "Installed {} but failed to close connection: {source}",
                    report.applied.join(", ")
                );
                Err(MigrateError::CloseAfterInstall {
                    applied: report.applied,
                    source,
                })
            }
            (result, closed) => settle(result, closed),
        }
    }

    async fn load_history(&self, conn: &mut dyn Connection) -> MigrateResult<Vec<SchemaHistory>> {
        history_store::ensure_table(conn, &self.history_table).await?;
        history_store::load_history(conn, &self.history_table).await
    }

    async fn checked_history(
        &self,
        conn: &mut dyn Connection,
    ) -> MigrateResult<Vec<SchemaHistory>> {
        let history = self.load_history(conn).await?;
        check_consistency(&self.migrations, &history)?;
        Ok(history)
    }

    async fn install_on(&self, conn: &mut dyn Connection) -> MigrateResult<InstallReport> {
        let history = self.checked_history(conn).await?;
        let base_rank = history.len();
        let pending = pending_migrations(&self.migrations, &history);

        if pending.is_empty() {
            log::info!("Schema is up to date ({base_rank} migrations installed)");
            return Ok(InstallReport {
                base_rank,
                applied: Vec::new(),
            });
        }

        let mut applied = Vec::with_capacity(pending.len());
        for (offset, migration) in pending.iter().enumerate() {
            let rank = (base_rank + offset + 1) as i64;
            log::debug!("Applying migration {} at rank {}", migration.name(), rank);

            conn.execute(migration.content(), &[])
                .await
                .map_err(|source| MigrateError::ExecuteFailed {
                    name: migration.name().to_string(),
                    source,
                })?;

            let entry = SchemaHistory::new(migration.clone(), rank, now());
            history_store::record(conn, &self.history_table, &entry)
                .await
                .map_err(|source| MigrateError::RecordFailed {
                    name: migration.name().to_string(),
                    rank,
                    source,
                })?;

            applied.push(migration.name().to_string());
        }

        log::info!(
            "Installed {} migrations (ranks {}..={})",
            applied.len(),
            base_rank + 1,
            base_rank + applied.len()
        );
        Ok(InstallReport { base_rank, applied })
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

/// Close `conn`, keeping the operation's own error if both fail.
fn finish<T>(conn: Box<dyn Connection>, result: MigrateResult<T>) -> MigrateResult<T> {
    let closed = conn.close();
    settle(result, closed)
}

fn settle<T>(result: MigrateResult<T>, closed: DbResult<()>) -> MigrateResult<T> {
    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            log::warn!("Failed to close connection after error: {close_err}");
            Err(e)
        }
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
