//! Runs a script's statements in order and reports each one.
//!
//! Execution is strictly sequential and fail-fast: the first error ends the
//! run, nothing after the failing statement is attempted, and no total is
//! printed.

use std::io::Write;
use std::time::Duration;

use tracing::{debug, info};

use crate::db::DatabaseClient;
use crate::error::Result;
use crate::query::execute;
use crate::report::ReportPrinter;
use crate::statement::Statement;

/// Totals accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of statements executed.
    pub statements: usize,

    /// Sum of the per-statement elapsed times.
    pub total: Duration,
}

impl RunSummary {
    fn record(&mut self, elapsed: Duration) {
        self.statements += 1;
        self.total += elapsed;
    }
}

/// Executes statements against one client and prints the report.
pub struct Driver<'a, W: Write> {
    client: &'a mut dyn DatabaseClient,
    printer: ReportPrinter<W>,
}

impl<'a, W: Write> Driver<'a, W> {
    /// Creates a driver over an open client.
    pub fn new(client: &'a mut dyn DatabaseClient, printer: ReportPrinter<W>) -> Self {
        Self { client, printer }
    }

    /// Runs every statement in order, then prints the total.
    pub async fn run(&mut self, statements: &[Statement]) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        for statement in statements {
            debug!(
                "Executing statement {} of {}",
                statement.position(),
                statements.len()
            );

            let executed = execute(&mut *self.client, statement).await?;
            self.printer.print_statement(statement, &executed)?;
            summary.record(executed.elapsed);
        }

        self.printer.print_total(&summary)?;
        info!(
            "Executed {} statement(s) in {:?}",
            summary.statements, summary.total
        );
        Ok(summary)
    }

    /// Consumes the driver, returning its printer.
    pub fn into_printer(self) -> ReportPrinter<W> {
        self.printer
    }
}
