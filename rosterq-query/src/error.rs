//! Error types for query operations.
//!
//! Error codes follow a pattern: Q{category}{number}
//! - 1xxx: query errors (ambiguous result, invalid condition/page)
//! - 2xxx: row projection errors (missing column, type mismatch)
//! - 3xxx: data store failures (propagated from the engine)
//!
//! "Not found" is deliberately *not* an error: single-row fetches return
//! `Ok(None)` so callers handle absence without control-flow signaling.

use std::fmt;
use thiserror::Error;

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Query errors (1xxx)
    /// Multiple rows found when expecting one (Q1001).
    NotUnique = 1001,
    /// A criterion value is malformed (Q1002).
    InvalidCondition = 1002,
    /// Page request with a zero limit (Q1003).
    InvalidPage = 1003,

    // Row projection errors (2xxx)
    /// Projected column missing from the row (Q2001).
    ColumnNotFound = 2001,
    /// Column value had an unexpected type (Q2002).
    TypeMismatch = 2002,

    // Store errors (3xxx)
    /// Failure surfaced by the data store collaborator (Q3001).
    StoreFailure = 3001,

    /// Internal error (Q9001).
    Internal = 9001,
}

impl ErrorCode {
    /// Get the error code string (e.g., "Q1001").
    pub fn code(&self) -> String {
        format!("Q{}", *self as u16)
    }

    /// Get a short description of the error code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::NotUnique => "Multiple rows found",
            Self::InvalidCondition => "Invalid search condition",
            Self::InvalidPage => "Invalid page request",
            Self::ColumnNotFound => "Column not found",
            Self::TypeMismatch => "Unexpected column type",
            Self::StoreFailure => "Data store failure",
            Self::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during query operations.
#[derive(Error, Debug)]
pub struct QueryError {
    /// The error code.
    pub code: ErrorCode,
    /// The error message.
    pub message: String,
    /// The source error (if any).
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)
    }
}

impl QueryError {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Set the source error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not unique error for a single-row fetch.
    pub fn not_unique(relation: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotUnique,
            format!(
                "Expected a unique {} row but the predicate matched multiple",
                relation.into()
            ),
        )
    }

    /// Create an invalid condition error.
    pub fn invalid_condition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCondition, message)
    }

    /// Create an invalid page error.
    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPage, message)
    }

    /// Create a column-not-found error for row projection.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ColumnNotFound,
            format!("column '{}' not found in row", column.into()),
        )
    }

    /// Create a type-mismatch error for row projection.
    pub fn type_mismatch(column: impl Into<String>, expected: &str) -> Self {
        Self::new(
            ErrorCode::TypeMismatch,
            format!("column '{}' is not {}", column.into(), expected),
        )
    }

    /// Create a store failure wrapping the collaborator's error verbatim.
    pub fn store_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreFailure, message)
    }

    /// Create an internal error for invariant violations.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string() {
        assert_eq!(ErrorCode::NotUnique.code(), "Q1001");
        assert_eq!(ErrorCode::StoreFailure.code(), "Q3001");
    }

    #[test]
    fn test_not_unique_display() {
        let err = QueryError::not_unique("member");
        assert_eq!(err.code, ErrorCode::NotUnique);
        assert!(err.to_string().starts_with("[Q1001]"));
        assert!(err.to_string().contains("member"));
    }

    #[test]
    fn test_internal_code_string() {
        let err = QueryError::internal("invariant violated");
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.code.code(), "Q9001");
    }

    #[test]
    fn test_store_failure_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "gone");
        let err = QueryError::store_failure("connection lost").with_source(io);
        assert_eq!(err.code, ErrorCode::StoreFailure);
        assert!(std::error::Error::source(&err).is_some());
    }
}
