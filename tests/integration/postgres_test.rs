//! Script runs against a real PostgreSQL database.
//!
//! Each test opens its own connection and only creates temporary tables.

use pretty_assertions::assert_eq;
use sql_runner::config::{ConnectionConfig, OutputFormat};
use sql_runner::db::{DatabaseClient, PostgresClient};
use sql_runner::error::RunnerError;

use super::common::{run_script, without_timings};

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresClient> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    PostgresClient::connect(&config).await.ok()
}

#[tokio::test]
async fn test_create_insert_select() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (result, output) = run_script(
        &mut client,
        "CREATE TEMP TABLE t(x int); INSERT INTO t VALUES (1); SELECT * FROM t;",
        OutputFormat::Table,
    )
    .await;
    result.unwrap();

    let expected = "\
OK (no result set)
Query: CREATE TEMP TABLE t(x int)
Time Taken: <t>

OK (no result set)
Query: INSERT INTO t VALUES (1)
Time Taken: <t>

+---+
| x |
+---+
| 1 |
+---+
Query: SELECT * FROM t
Time Taken: <t>

Total Time Taken: <t>";
    assert_eq!(without_timings(&output), expected);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_nulls_and_returning_without_rows() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (result, output) = run_script(
        &mut client,
        "CREATE TEMP TABLE people(id int, name text);
         INSERT INTO people VALUES (1, NULL);
         DELETE FROM people WHERE id = 2 RETURNING id;
         SELECT id, name FROM people;",
        OutputFormat::Table,
    )
    .await;
    result.unwrap();

    let output = without_timings(&output);
    assert!(output.contains("+----+\n| id |\n+----+\nQuery: DELETE FROM people"));
    assert!(output.contains("| 1  | NULL |"));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_headers_follow_schema_changes() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (result, output) = run_script(
        &mut client,
        "CREATE TEMP TABLE p(x int);
         DELETE FROM p WHERE false RETURNING *;
         ALTER TABLE p ADD COLUMN y int;
         DELETE FROM p WHERE false RETURNING *;",
        OutputFormat::Table,
    )
    .await;
    result.unwrap();

    let expected = "\
OK (no result set)
Query: CREATE TEMP TABLE p(x int)
Time Taken: <t>

+---+
| x |
+---+
Query: DELETE FROM p WHERE false RETURNING *
Time Taken: <t>

OK (no result set)
Query: ALTER TABLE p ADD COLUMN y int
Time Taken: <t>

+---+---+
| x | y |
+---+---+
Query: DELETE FROM p WHERE false RETURNING *
Time Taken: <t>

Total Time Taken: <t>";
    assert_eq!(without_timings(&output), expected);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_transaction_control_statements() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (result, _) = run_script(
        &mut client,
        "BEGIN; CREATE TEMP TABLE tx(x int); INSERT INTO tx VALUES (1); ROLLBACK;",
        OutputFormat::Table,
    )
    .await;
    assert_eq!(result.unwrap().statements, 4);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_read_only_script_is_repeatable() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let script = "SELECT n, n * 2 AS twice FROM generate_series(1, 3) AS n ORDER BY n;";
    let (first, first_output) = run_script(&mut client, script, OutputFormat::Table).await;
    let (second, second_output) = run_script(&mut client, script, OutputFormat::Table).await;

    first.unwrap();
    second.unwrap();
    assert_eq!(without_timings(&first_output), without_timings(&second_output));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_malformed_sql_stops_the_run() {
    let Some(mut client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let (result, output) = run_script(
        &mut client,
        "SELECT 1 AS one; SELEC 2; SELECT 3 AS three;",
        OutputFormat::Table,
    )
    .await;

    match result.unwrap_err() {
        RunnerError::Execution {
            position, message, ..
        } => {
            assert_eq!(position, 2);
            assert!(message.contains("syntax error"));
        }
        other => panic!("expected execution error, got {other:?}"),
    }
    assert!(output.contains("| one |"));
    assert!(!output.contains("three"));
    assert!(!output.contains("Total Time Taken"));

    client.close().await.unwrap();
}
