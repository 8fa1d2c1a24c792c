//! Storage error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Stage of a storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// Opening the database file.
    #[display("connection")]
    Connection,
    /// Applying the embedded schema migrations.
    #[display("migration")]
    Migration,
    /// Reading or writing key-value entries.
    #[display("query")]
    Query,
}

/// Storage error with the stage that failed and the caller's location.
#[derive(Debug, Clone, Display, Error)]
#[display("Database {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Failing stage.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a storage error tagged with the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(DbErrorKind::Query, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_stage_and_location() {
        let err = DbError::new(DbErrorKind::Migration, "table exists");
        let text = err.to_string();
        assert!(text.starts_with("Database migration error: table exists at "));
        assert!(text.contains("error.rs"));
    }

    #[test]
    fn diesel_errors_are_queries() {
        let err = DbError::from(diesel::result::Error::NotFound);
        assert_eq!(err.kind, DbErrorKind::Query);
    }
}
