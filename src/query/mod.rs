//! Statement execution.
//!
//! Runs one statement at a time against a [`DatabaseClient`](crate::db::DatabaseClient)
//! and decides what, if anything, should be rendered for it.

pub mod executor;

pub use executor::{execute, ExecutionOutcome, Outcome};
