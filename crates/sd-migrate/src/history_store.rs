//! Reading and writing the schema history table.

use crate::error::{MigrateError, MigrateResult};
use chrono::NaiveDateTime;
use sd_core::history::INSTALLED_TIME_FORMAT;
use sd_core::{HistoryTableName, Migration, SchemaHistory};
use sd_db::{Connection, SqlParam};

/// DDL for the history table and, when qualified, its schema.
pub fn create_table_sql(table: &HistoryTableName) -> String {
    let create_table = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n\
         \"rank\" INTEGER NOT NULL PRIMARY KEY,\n\
         \"name\" VARCHAR NOT NULL UNIQUE,\n\
         \"content\" TEXT NOT NULL,\n\
         \"installed_time\" TIMESTAMP NOT NULL\n\
         );",
        table.quoted()
    );
    match table.schema() {
        Some(schema) => format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\";\n{create_table}"),
        None => create_table,
    }
}

/// Create the history table if absent.
pub async fn ensure_table(conn: &mut dyn Connection, table: &HistoryTableName) -> MigrateResult<()> {
    conn.execute(&create_table_sql(table), &[])
        .await
        .map_err(|source| MigrateError::InitializeFailed {
            table: table.to_string(),
            source,
        })?;
    Ok(())
}

/// Load every history row ordered by rank.
pub async fn load_history(
    conn: &mut dyn Connection,
    table: &HistoryTableName,
) -> MigrateResult<Vec<SchemaHistory>> {
    let sql = format!(
        "SELECT \"rank\", \"name\", \"content\", strftime(\"installed_time\", '{}') \
         FROM {} ORDER BY \"rank\" ASC",
        INSTALLED_TIME_FORMAT,
        table.quoted()
    );
    let result = conn
        .query(&sql)
        .await
        .map_err(|source| MigrateError::InitializeFailed {
            table: table.to_string(),
            source,
        })?;

    result.rows.into_iter().map(decode_row).collect()
}

fn decode_row(row: Vec<Option<String>>) -> MigrateResult<SchemaHistory> {
    let [rank, name, content, installed_time]: [Option<String>; 4] =
        row.try_into().map_err(|row: Vec<_>| {
            MigrateError::HistoryDecode(format!("expected 4 columns, got {}", row.len()))
        })?;

    let rank = required(rank, "rank")?;
    let rank: i64 = rank
        .parse()
        .map_err(|e| MigrateError::HistoryDecode(format!("rank '{rank}': {e}")))?;
    let installed_time = required(installed_time, "installed_time")?;
    let installed_time = NaiveDateTime::parse_from_str(&installed_time, INSTALLED_TIME_FORMAT)
        .map_err(|e| {
            MigrateError::HistoryDecode(format!("installed_time '{installed_time}': {e}"))
        })?;

    Ok(SchemaHistory::new(
        Migration::new(required(name, "name")?, required(content, "content")?),
        rank,
        installed_time,
    ))
}

fn required(value: Option<String>, column: &str) -> MigrateResult<String> {
    value.ok_or_else(|| MigrateError::HistoryDecode(format!("{column} is NULL")))
}

/// Append one history row.
pub async fn record(
    conn: &mut dyn Connection,
    table: &HistoryTableName,
    entry: &SchemaHistory,
) -> sd_db::DbResult<()> {
    let sql = format!(
        "INSERT INTO {} (\"rank\", \"name\", \"content\", \"installed_time\") \
         VALUES (?, ?, ?, CAST(? AS TIMESTAMP))",
        table.quoted()
    );
    conn.execute(
        &sql,
        &[
            SqlParam::Integer(entry.rank()),
            SqlParam::from(entry.name()),
            SqlParam::from(entry.content()),
            SqlParam::Text(entry.installed_time_display()),
        ],
    )
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "history_store_test.rs"]
mod tests;
