//! Integration tests for sql-runner.

pub mod common;
pub mod postgres_test;
