//! sql-runner - run a file of SQL statements and report results and timings.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod db;
pub mod driver;
pub mod error;
pub mod logging;
pub mod query;
pub mod report;
pub mod statement;
