//! Mock database client for testing.
//!
//! Answers statements from a table of canned results keyed by SQL text and
//! records every statement it was asked to run.

use super::{ColumnInfo, DatabaseClient, QueryResult};
use crate::error::{Result, RunnerError};
use crate::statement::Statement;
use async_trait::async_trait;
use std::collections::HashMap;

/// A mock database client that returns predefined results.
///
/// Statements without a canned result succeed with no rows and no columns.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    results: HashMap<String, QueryResult>,
    described: HashMap<String, Vec<ColumnInfo>>,
    failures: HashMap<String, String>,
    executed: Vec<String>,
    closed: bool,
}

impl MockDatabaseClient {
    /// Creates a mock that answers every statement with an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `sql` with `result`.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(sql.into(), result);
        self
    }

    /// Reports `columns` when `sql` is described.
    pub fn with_described_columns(
        mut self,
        sql: impl Into<String>,
        columns: Vec<ColumnInfo>,
    ) -> Self {
        self.described.insert(sql.into(), columns);
        self
    }

    /// Fails `sql` with the given server message.
    pub fn with_failure(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(sql.into(), message.into());
        self
    }

    /// Statements submitted through `query`, in order.
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(RunnerError::connection("Connection is already closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult> {
        self.ensure_open()?;
        self.executed.push(statement.sql().to_string());

        if let Some(message) = self.failures.get(statement.sql()) {
            return Err(RunnerError::execution(
                statement.position(),
                statement.sql(),
                message.clone(),
            ));
        }

        let mut result = self
            .results
            .get(statement.sql())
            .cloned()
            .unwrap_or_default();
        // Like a real server round trip, zero rows carry no column metadata.
        if result.rows.is_empty() {
            result.columns.clear();
        }
        Ok(result)
    }

    async fn describe_columns(&mut self, statement: &Statement) -> Result<Vec<ColumnInfo>> {
        self.ensure_open()?;

        if let Some(columns) = self.described.get(statement.sql()) {
            return Ok(columns.clone());
        }
        Ok(self
            .results
            .get(statement.sql())
            .map(|result| result.columns.clone())
            .unwrap_or_default())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}
