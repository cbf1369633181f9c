//! Shared helpers for integration tests.

use sql_runner::config::OutputFormat;
use sql_runner::db::DatabaseClient;
use sql_runner::driver::{Driver, RunSummary};
use sql_runner::error::Result;
use sql_runner::report::ReportPrinter;
use sql_runner::statement::split;

/// Runs `script` on `client` and returns the run result plus everything printed.
pub async fn run_script(
    client: &mut dyn DatabaseClient,
    script: &str,
    format: OutputFormat,
) -> (Result<RunSummary>, String) {
    let statements = split(script);
    let mut driver = Driver::new(client, ReportPrinter::new(Vec::new(), format));
    let result = driver.run(&statements).await;
    let output = String::from_utf8(driver.into_printer().into_inner()).unwrap();
    (result, output)
}

/// Drops the timing values so reports can be compared exactly.
pub fn without_timings(output: &str) -> String {
    output
        .lines()
        .map(|line| match line.split_once("Time Taken: ") {
            Some((prefix, _)) => format!("{prefix}Time Taken: <t>"),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
