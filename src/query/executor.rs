//! Executes a single statement and times it.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::db::{DatabaseClient, QueryResult};
use crate::error::{Result, RunnerError};
use crate::statement::{no_result_keyword, Statement};

/// What a statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Rows were returned, or a command statement reported a column list.
    ///
    /// The result may have zero rows, in which case only headers are shown.
    ResultSet(QueryResult),

    /// A command statement that returned neither rows nor columns.
    NoResult,

    /// A query outside the command keyword set that returned no rows.
    /// Nothing but its timing is reported.
    Empty,
}

impl Outcome {
    /// Short machine-readable name of the outcome.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ResultSet(_) => "result_set",
            Self::NoResult => "no_result",
            Self::Empty => "empty",
        }
    }
}

/// The outcome of one statement plus how long it took.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutcome {
    /// What the statement produced.
    pub outcome: Outcome,

    /// Wall-clock time from submission until all rows were materialized.
    pub elapsed: Duration,
}

/// Runs `statement` on `client`.
///
/// Column metadata for a zero-row command is looked up after the clock stops,
/// so `elapsed` covers only submission and row materialization.
pub async fn execute(
    client: &mut dyn DatabaseClient,
    statement: &Statement,
) -> Result<ExecutionOutcome> {
    let start = Instant::now();
    let result = client.query(statement).await?;
    let elapsed = start.elapsed();

    if let Some(row) = result.first_ragged_row() {
        return Err(RunnerError::execution(
            statement.position(),
            statement.sql(),
            format!(
                "row {} has {} cell(s) but the result has {} column(s)",
                row + 1,
                result.rows[row].len(),
                result.columns.len()
            ),
        ));
    }

    debug!(
        "Statement {} returned {} row(s) in {:?}",
        statement.position(),
        result.row_count(),
        elapsed
    );

    let outcome = if !result.is_empty() {
        Outcome::ResultSet(result)
    } else if let Some(keyword) = no_result_keyword(statement.sql()) {
        debug!("Statement {} is a {keyword} command", statement.position());
        let columns = match client.describe_columns(statement).await {
            Ok(columns) => columns,
            Err(e) => {
                warn!(
                    "Could not describe columns of statement {}: {e}",
                    statement.position()
                );
                Vec::new()
            }
        };
        if columns.is_empty() {
            Outcome::NoResult
        } else {
            Outcome::ResultSet(QueryResult::headers_only(columns))
        }
    } else {
        Outcome::Empty
    };

    Ok(ExecutionOutcome { outcome, elapsed })
}
