//! Rendering of statement results and timings.
//!
//! The `render_*` functions are pure and return text; [`ReportPrinter`]
//! writes them to a sink in the configured [`OutputFormat`].

use std::io::Write;
use std::time::Duration;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::db::{QueryResult, Row, Value};
use crate::driver::RunSummary;
use crate::error::{Result, RunnerError};
use crate::query::{ExecutionOutcome, Outcome};
use crate::statement::Statement;

/// Line printed for a command that returned nothing.
const NO_RESULT_MESSAGE: &str = "OK (no result set)";

/// Renders a result as a bordered text table.
///
/// Every column is as wide as its widest cell or header. A result with
/// columns but no rows renders as headers only.
pub fn render_result(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return "(empty result)\n".to_string();
    }

    let widths = column_widths(result);
    let mut out = String::new();

    push_border(&mut out, &widths);
    push_cells(&mut out, result.column_names(), &widths);
    push_border(&mut out, &widths);

    if !result.rows.is_empty() {
        for row in &result.rows {
            push_cells(&mut out, row.iter().map(Value::as_display_str), &widths);
        }
        push_border(&mut out, &widths);
    }

    out
}

/// Renders the confirmation for a command that returned no result set.
pub fn render_no_result() -> String {
    format!("{NO_RESULT_MESSAGE}\n")
}

/// Renders the timing line for one statement.
pub fn render_timing(statement: &Statement, elapsed: Duration) -> String {
    format!(
        "Query: {}\nTime Taken: {:.6} seconds\n",
        statement.sql(),
        elapsed.as_secs_f64()
    )
}

/// Renders the total time across all statements.
pub fn render_total(total: Duration) -> String {
    format!("Total Time Taken: {:.6} seconds\n", total.as_secs_f64())
}

fn column_widths(result: &QueryResult) -> Vec<usize> {
    let mut widths: Vec<usize> = result
        .column_names()
        .map(|name| name.chars().count())
        .collect();

    for row in &result.rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.as_display_str().chars().count());
        }
    }

    widths
}

fn push_border(out: &mut String, widths: &[usize]) {
    out.push('+');
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out.push('\n');
}

fn push_cells<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.zip(widths) {
        out.push_str(&format!(" {cell:<width$} |"));
    }
    out.push('\n');
}

/// One statement in the JSON report.
#[derive(Serialize)]
struct StatementReport<'a> {
    position: usize,
    sql: &'a str,
    outcome: &'static str,
    columns: Vec<&'a str>,
    rows: &'a [Row],
    elapsed_secs: f64,
}

/// The closing object of the JSON report.
#[derive(Serialize)]
struct TotalReport {
    statements: usize,
    total_secs: f64,
}

/// Writes the report for a run to an output sink.
pub struct ReportPrinter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ReportPrinter<W> {
    /// Creates a printer writing to `out`.
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Writes what a statement produced, followed by its timing.
    pub fn print_statement(
        &mut self,
        statement: &Statement,
        executed: &ExecutionOutcome,
    ) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                match &executed.outcome {
                    Outcome::ResultSet(result) => {
                        self.out.write_all(render_result(result).as_bytes())?
                    }
                    Outcome::NoResult => self.out.write_all(render_no_result().as_bytes())?,
                    Outcome::Empty => {}
                }
                let timing = render_timing(statement, executed.elapsed);
                writeln!(self.out, "{timing}")?;
            }
            OutputFormat::Json => {
                let (columns, rows): (Vec<&str>, &[Row]) = match &executed.outcome {
                    Outcome::ResultSet(result) => {
                        (result.column_names().collect(), result.rows.as_slice())
                    }
                    Outcome::NoResult | Outcome::Empty => (Vec::new(), &[][..]),
                };
                let report = StatementReport {
                    position: statement.position(),
                    sql: statement.sql(),
                    outcome: executed.outcome.kind(),
                    columns,
                    rows,
                    elapsed_secs: executed.elapsed.as_secs_f64(),
                };
                self.write_json(&report)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Writes the total for the whole run.
    pub fn print_total(&mut self, summary: &RunSummary) -> Result<()> {
        match self.format {
            OutputFormat::Table => self.out.write_all(render_total(summary.total).as_bytes())?,
            OutputFormat::Json => self.write_json(&TotalReport {
                statements: summary.statements,
                total_secs: summary.total.as_secs_f64(),
            })?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Consumes the printer, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.out, value)
            .map_err(|e| RunnerError::output(format!("Failed to write JSON report: {e}")))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}
