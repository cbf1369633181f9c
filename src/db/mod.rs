//! Database abstraction layer for sql-runner.
//!
//! Provides a trait-based interface over the single connection a run uses,
//! so the runner and driver can be exercised against the in-memory mock.

mod mock;
mod postgres;
mod types;

pub use mock::MockDatabaseClient;
pub use postgres::PostgresClient;
pub use types::{ColumnInfo, QueryResult, Row, Value, NULL_MARKER};

use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::statement::Statement;
use async_trait::async_trait;

/// Opens the database connection described by `config`.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for database clients.
///
/// A client wraps exactly one connection and is used by one statement at a
/// time. Failures of `query` are `RunnerError::Execution` values naming the
/// statement.
#[async_trait]
pub trait DatabaseClient: Send {
    /// Submits a statement and materializes every row it returns.
    ///
    /// Columns are filled from the returned rows, so a zero-row result has
    /// no columns.
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult>;

    /// Returns the columns the statement would produce, without running it.
    async fn describe_columns(&mut self, statement: &Statement) -> Result<Vec<ColumnInfo>>;

    /// Closes the connection. Later calls fail.
    async fn close(&mut self) -> Result<()>;
}
