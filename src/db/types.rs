//! Query result types for sql-runner.
//!
//! Defines the structures used to represent query results from the database.

use serde::Serialize;
use std::fmt;

/// Marker rendered in place of a NULL cell.
pub const NULL_MARKER: &str = "NULL";

/// Rows returned by one statement, with their column metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Column metadata for the result set, in server order.
    pub columns: Vec<ColumnInfo>,

    /// Rows of data, in server order.
    pub rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a new empty query result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a query result with the given columns and rows.
    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Creates a result that has a column list but no rows.
    pub fn headers_only(columns: Vec<ColumnInfo>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Returns true if the result set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|col| col.name.as_str())
    }

    /// Returns the index of the first row whose width differs from the column count.
    pub fn first_ragged_row(&self) -> Option<usize> {
        let width = self.columns.len();
        self.rows.iter().position(|row| row.len() != width)
    }
}

/// A column in a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name as reported by the server.
    pub name: String,
}

impl ColumnInfo {
    /// Creates a new column info with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// A single cell: the server's text representation, or NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Text representation of a non-null value.
    Text(String),
}

impl Value {
    /// Returns the value as it is rendered in a table cell.
    pub fn as_display_str(&self) -> &str {
        match self {
            Value::Null => NULL_MARKER,
            Value::Text(s) => s,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display_str())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
