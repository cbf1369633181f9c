//! Logging configuration for sql-runner.
//!
//! Logs go to stderr so they never interleave with the report on stdout.

use std::io::{self, Write};

use tracing::{error, Level};
use tracing_subscriber::EnvFilter;

use crate::error::RunnerError;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Initializes logging to stderr, filtered by `RUST_LOG`.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Reports the error that ended the run.
///
/// Logged at error level, or written straight to stderr when the filter
/// drops error events.
pub fn report_fatal(err: &RunnerError) {
    if tracing::enabled!(Level::ERROR) {
        error!("{}: {}", err.category(), err);
    } else {
        // Nothing left to report to if stderr itself is gone.
        let _ = write_fatal(&mut io::stderr(), err);
    }
}

/// Writes `<category>: <message>` for a fatal error.
pub fn write_fatal<W: Write>(out: &mut W, err: &RunnerError) -> io::Result<()> {
    writeln!(out, "{}: {}", err.category(), err)
}
