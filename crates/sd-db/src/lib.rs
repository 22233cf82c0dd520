//! sd-db - Database abstraction layer for Sediment
//!
//! This crate provides the `Database`/`Connection` traits the migration engine
//! drives, and their DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{Connection, Database, QueryResult, SqlParam};
