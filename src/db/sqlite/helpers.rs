//! Shared helper functions for SQLite repositories.

use crate::db::DbError;

/// Escape character used in `LIKE ... ESCAPE` clauses.
pub const LIKE_ESCAPE: char = '\\';

/// Build a `LIKE` pattern matching names that contain `filter`.
///
/// Returns None for empty/whitespace-only filters (list everything).
/// `%` and `_` in the filter match literally.
pub fn contains_pattern(filter: &str) -> Option<String> {
    let trimmed = filter.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut pattern = String::with_capacity(trimmed.len() + 2);
    pattern.push('%');
    for c in trimmed.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');

    Some(pattern)
}

/// Map a statement failure to a storage-agnostic error.
///
/// Pool exhaustion and I/O failures are connection problems; everything
/// else is reported as a database error.
pub fn database_error(e: sqlx::Error) -> DbError {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DbError::Connection {
                message: e.to_string(),
            }
        }
        _ => DbError::Database {
            message: e.to_string(),
        },
    }
}
