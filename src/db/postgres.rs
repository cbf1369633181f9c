//! PostgreSQL database client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient`
//! trait over a single sqlx `PgConnection`. Statements go through the simple
//! query protocol, so every cell arrives as the server's text representation.

use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseClient, QueryResult, Row, Value};
use crate::error::{Result, RunnerError};
use crate::statement::Statement;
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::{PgColumn, PgConnection, PgRow};
use sqlx::{
    Column as SqlxColumn, Connection, Executor, Row as SqlxRow, Statement as SqlxStatement,
};
use tracing::debug;

/// PostgreSQL database client holding one connection.
#[derive(Debug)]
pub struct PostgresClient {
    conn: Option<PgConnection>,
}

impl PostgresClient {
    /// Opens a connection. No retry is attempted.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let options = config.connect_options();

        let conn = PgConnection::connect_with(&options)
            .await
            .map_err(|e| map_connection_error(e, config))?;

        debug!("Connected to {}", config.display_string());
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&mut self) -> Result<&mut PgConnection> {
        self.conn
            .as_mut()
            .ok_or_else(|| RunnerError::connection("Connection is already closed"))
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn query(&mut self, statement: &Statement) -> Result<QueryResult> {
        let conn = self.conn()?;
        let mut result = QueryResult::new();

        // The stream borrows the connection until it is dropped at the end of
        // this scope, on success and on error alike.
        let mut rows = sqlx::raw_sql(statement.sql()).fetch(&mut *conn);
        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| execution_error(statement, &e))?
        {
            if result.rows.is_empty() {
                result.columns = convert_columns(row.columns());
            }
            let converted = convert_row(&row).map_err(|e| execution_error(statement, &e))?;
            result.rows.push(converted);
        }

        Ok(result)
    }

    async fn describe_columns(&mut self, statement: &Statement) -> Result<Vec<ColumnInfo>> {
        let conn = self.conn()?;

        let prepared = (&mut *conn)
            .prepare(statement.sql())
            .await
            .map_err(|e| execution_error(statement, &e))?;
        let columns = convert_columns(prepared.columns());

        // The statement cache is keyed by SQL text only, so a cached entry
        // would keep reporting the columns from before a schema change.
        conn.clear_cached_statements()
            .await
            .map_err(|e| execution_error(statement, &e))?;

        Ok(columns)
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .await
                .map_err(|e| RunnerError::connection(format!("Failed to close connection: {e}")))?;
            debug!("Connection closed");
        }
        Ok(())
    }
}

/// Converts sqlx column descriptions to our column metadata.
fn convert_columns(columns: &[PgColumn]) -> Vec<ColumnInfo> {
    columns
        .iter()
        .map(|col| ColumnInfo::new(col.name()))
        .collect()
}

/// Converts a sqlx PgRow to our Row type.
fn convert_row(row: &PgRow) -> sqlx::Result<Row> {
    (0..row.len()).map(|i| convert_value(row, i)).collect()
}

/// Converts a single text-format cell to our Value type.
fn convert_value(row: &PgRow, index: usize) -> sqlx::Result<Value> {
    // Text-format values decode as their display string regardless of the
    // column type, so the type check is skipped.
    row.try_get_unchecked::<Option<String>, _>(index)
        .map(Value::from)
}

fn execution_error(statement: &Statement, error: &sqlx::Error) -> RunnerError {
    RunnerError::execution(
        statement.position(),
        statement.sql(),
        format_query_error(error),
    )
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> RunnerError {
    let host = &config.host;
    let port = config.port;
    let user = &config.user;
    let database = &config.database;

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        RunnerError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        RunnerError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        RunnerError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        RunnerError::connection(format!(
            "TLS negotiation failed with sslmode={}: {error}",
            config.sslmode
        ))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        RunnerError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        RunnerError::connection(error.to_string())
    }
}

/// Formats a statement error with the server's detail fields when present.
fn format_query_error(error: &sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    let mut result = String::from("ERROR: ");
    result.push_str(db_error.message());

    if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
        if let Some(detail) = pg_error.detail() {
            result.push_str("\n  DETAIL: ");
            result.push_str(detail);
        }

        if let Some(hint) = pg_error.hint() {
            result.push_str("\n  HINT: ");
            result.push_str(hint);
        }

        if let Some(table) = pg_error.table() {
            result.push_str("\n  TABLE: ");
            result.push_str(table);
        }

        if let Some(column) = pg_error.column() {
            result.push_str("\n  COLUMN: ");
            result.push_str(column);
        }

        if let Some(constraint) = pg_error.constraint() {
            result.push_str("\n  CONSTRAINT: ");
            result.push_str(constraint);
        }
    }

    result
}
