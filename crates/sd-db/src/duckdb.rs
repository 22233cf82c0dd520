//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{Connection, Database, QueryResult, SqlParam};
use async_trait::async_trait;
use duckdb::types::{ToSql, ToSqlOutput, Value};
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
///
/// Holds a root connection; [`Database::connect`] clones it so every logical
/// connection sees the same database, including `:memory:` ones.
pub struct DuckDbBackend {
    root: Mutex<duckdb::Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB database
    pub fn in_memory() -> DbResult<Self> {
        let conn = duckdb::Connection::open_in_memory()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            root: Mutex::new(conn),
        })
    }

    /// Open (or create) a DuckDB database file
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = duckdb::Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            root: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn connect(&self) -> DbResult<Box<dyn Connection>> {
        let root = self
            .root
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))?;
        let conn = root
            .try_clone()
            .map_err(|e| DbError::ConnectionError(e.to_string()))?;
        log::debug!("Opened duckdb connection");
        Ok(Box::new(DuckDbConnection { conn }))
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

/// A cloned DuckDB connection
pub struct DuckDbConnection {
    conn: duckdb::Connection,
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> duckdb::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::Integer(v) => v.to_sql(),
            SqlParam::Text(v) => v.to_sql(),
            SqlParam::Null => Ok(ToSqlOutput::Owned(Value::Null)),
        }
    }
}

#[async_trait]
impl Connection for DuckDbConnection {
    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> DbResult<usize> {
        if params.is_empty() {
            self.conn
                .execute_batch(sql)
                .map_err(|e| DbError::ExecutionError(e.to_string()))?;
            return Ok(0);
        }
        self.conn
            .execute(sql, duckdb::params_from_iter(params.iter()))
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    async fn query(&mut self, sql: &str) -> DbResult<QueryResult> {
        let mut stmt = self.conn.prepare(sql).map_err(DbError::from)?;

        // column_count() panics before execution, so collect rows first
        let rows: Vec<Vec<Option<String>>> = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count)
                    .map(|i| get_column_as_string(row, i))
                    .collect())
            })
            .map_err(|e| DbError::QueryError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::QueryError(format!("row error: {e}")))?;

        let columns = (0..stmt.column_count())
            .map(|i| stmt.column_name(i).map_or("?".to_string(), |v| v.to_string()))
            .collect();

        Ok(QueryResult { columns, rows })
    }

    fn close(self: Box<Self>) -> DbResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| DbError::CloseError(e.to_string()))?;
        log::debug!("Closed duckdb connection");
        Ok(())
    }
}

/// Read a column value as a string, trying multiple DuckDB types.
///
/// Integer columns come back as `None` for `Option<String>`, so try
/// String -> i64 -> f64 -> bool before treating the value as NULL.
fn get_column_as_string(row: &duckdb::Row<'_>, idx: usize) -> Option<String> {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return Some(s);
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return Some(n.to_string());
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return Some(f.to_string());
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return Some(b.to_string());
    }
    None
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
