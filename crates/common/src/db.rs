//! Shared database types for Worklane
//!
//! This module provides common database-related types used across domain repositories.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => {
                if is_unique_violation(&e) {
                    Error::Conflict("Record already exists".to_string())
                } else {
                    Error::Database(e)
                }
            }
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
        }
    }
}

/// Whether a sqlx error is a unique-constraint violation.
///
/// Uniqueness invariants (one contract per proposal, one proposal per
/// project/freelancer pair) are enforced by the database; the losing side of a
/// concurrent race sees this error and must surface it as a conflict, not a 500.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}

/// Map a sqlx error from an INSERT/UPDATE into a domain conflict when it is a
/// unique violation, or pass it through as a database error otherwise.
pub fn conflict_on_unique_violation(err: sqlx::Error, conflict_message: &str) -> Error {
    if is_unique_violation(&err) {
        Error::Conflict(conflict_message.to_string())
    } else {
        Error::Database(err)
    }
}
