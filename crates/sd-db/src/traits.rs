//! Storage capability traits

use crate::error::DbResult;
use async_trait::async_trait;

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
    Null,
}

impl From<i64> for SqlParam {
    fn from(v: i64) -> Self {
        SqlParam::Integer(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(v.to_string())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        SqlParam::Text(v)
    }
}

/// Rows returned by [`Connection::query`].
///
/// Values are coerced to strings; SQL `NULL` is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Column names from the result set.
    pub columns: Vec<String>,
    /// Row values in column order.
    pub rows: Vec<Vec<Option<String>>>,
}

/// A storage backend that hands out connections.
///
/// Backends are selected at construction; the engine only sees this trait.
#[async_trait]
pub trait Database: Send + Sync {
    /// Open a new logical connection.
    async fn connect(&self) -> DbResult<Box<dyn Connection>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}

/// One logical connection. Statements run one at a time.
#[async_trait]
pub trait Connection: Send {
    /// Execute a statement, returning affected rows.
    ///
    /// With no parameters the statement text may contain several statements.
    async fn execute(&mut self, sql: &str, params: &[SqlParam]) -> DbResult<usize>;

    /// Run a query and collect every row.
    async fn query(&mut self, sql: &str) -> DbResult<QueryResult>;

    /// Release the connection.
    fn close(self: Box<Self>) -> DbResult<()>;
}
