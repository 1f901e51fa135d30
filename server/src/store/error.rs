//! Storage error types.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors produced by [`TodoStore`](super::TodoStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No todo with the given id exists.
    #[error("todo not found: {0}")]
    NotFound(i64),

    /// The supplied fields were rejected.
    #[error("invalid todo: {0}")]
    Validation(ValidationErrors),

    /// The underlying SQLite call failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Applying schema migrations failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// A stored row could not be decoded into a todo.
    #[error("corrupt todo row {id}: {reason}")]
    Corrupt { id: i64, reason: String },
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(errors)
    }
}
