//! Error types for sql-runner.
//!
//! Every error is fatal: the first one surfaced ends the run.

use thiserror::Error;

/// Main error type for sql-runner operations.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Configuration errors (missing environment values, invalid flags, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The SQL script could not be read.
    #[error("Script error: {0}")]
    ScriptRead(String),

    /// A statement was rejected by the server (syntax error, constraint violation, etc.)
    #[error("Statement {position} failed: {message}\n  Statement: {statement}")]
    Execution {
        /// 1-based position of the statement in the script.
        position: usize,
        /// The offending statement text.
        statement: String,
        /// The server's error message.
        message: String,
    },

    /// Writing the report to the output sink failed.
    #[error("Output error: {0}")]
    Output(String),
}

impl RunnerError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a script read error with the given message.
    pub fn script_read(msg: impl Into<String>) -> Self {
        Self::ScriptRead(msg.into())
    }

    /// Creates an execution error for the statement at `position`.
    pub fn execution(
        position: usize,
        statement: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Execution {
            position,
            statement: statement.into(),
            message: message.into(),
        }
    }

    /// Creates an output error with the given message.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Connection(_) => "Connection Error",
            Self::ScriptRead(_) => "Script Error",
            Self::Execution { .. } => "Execution Error",
            Self::Output(_) => "Output Error",
        }
    }
}

impl From<std::io::Error> for RunnerError {
    fn from(e: std::io::Error) -> Self {
        Self::output(e.to_string())
    }
}

/// Result type alias using RunnerError.
pub type Result<T> = std::result::Result<T, RunnerError>;
