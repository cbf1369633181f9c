//! Splits a SQL script into statements.
//!
//! Comments are stripped first, then the remaining text is cut on every `;`.
//! A `;` inside a quoted literal also ends a statement: the splitter does not
//! track quotes.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::Statement;
use crate::error::{Result, RunnerError};

/// Line comments run to end of line. Block comments end at the nearest `*/`,
/// or at end of input when unterminated.
static COMMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)--.*$|/\*(?s:.*?)(?:\*/|\z)").expect("comment pattern is valid")
});

/// Splits raw script text into trimmed, non-empty statements in script order.
pub fn split(raw: &str) -> Vec<Statement> {
    let cleaned = COMMENT_PATTERN.replace_all(raw, "");

    cleaned
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .enumerate()
        .filter_map(|(i, piece)| Statement::new(i + 1, piece))
        .collect()
}

/// Reads a UTF-8 script file and splits it into statements.
pub fn load_script(path: &Path) -> Result<Vec<Statement>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| RunnerError::script_read(format!("{}: {e}", path.display())))?;

    let statements = split(&raw);
    debug!(
        "Split {} into {} statement(s)",
        path.display(),
        statements.len()
    );
    Ok(statements)
}
