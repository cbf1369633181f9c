//! SQL script handling: statement boundaries and statement classification.
//!
//! Neither module understands SQL grammar. The splitter only finds
//! statement boundaries and the classifier only looks at the leading keyword.

mod classifier;
mod splitter;

pub use classifier::{is_no_result_command, no_result_keyword, NO_RESULT_KEYWORDS};
pub use splitter::{load_script, split};

use std::fmt;

/// A single SQL statement taken from a script.
///
/// The text is trimmed and never empty. Positions start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    position: usize,
    sql: String,
}

impl Statement {
    /// Creates a statement from raw text, trimming surrounding whitespace.
    ///
    /// Returns `None` if nothing is left after trimming.
    pub fn new(position: usize, sql: &str) -> Option<Self> {
        let trimmed = sql.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            position,
            sql: trimmed.to_string(),
        })
    }

    /// 1-based position of the statement within its script.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
