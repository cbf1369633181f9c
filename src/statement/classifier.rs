//! Leading-keyword classification of statements.

/// Statements starting with one of these keywords are not expected to
/// return a result set.
pub const NO_RESULT_KEYWORDS: [&str; 11] = [
    "CREATE", "ALTER", "INSERT", "DROP", "UPDATE", "DELETE", "SET", "GRANT", "REVOKE", "COMMIT",
    "ROLLBACK",
];

/// Returns the no-result keyword the statement starts with, if any.
///
/// This is a case-insensitive prefix test on the whole statement, so
/// `SETTINGS` matches `SET`.
pub fn no_result_keyword(sql: &str) -> Option<&'static str> {
    let upper = sql.to_uppercase();
    NO_RESULT_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| upper.starts_with(keyword))
}

/// Returns true if the statement is a command that produces no result set.
pub fn is_no_result_command(sql: &str) -> bool {
    no_result_keyword(sql).is_some()
}
