//! Error types for Pluma.

use thiserror::Error;

/// Common error type for Pluma.
#[derive(Error, Debug)]
pub enum PlumaError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend as plain strings so callers
    /// don't depend on driver types.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for PlumaError {
    fn from(e: sqlx::Error) -> Self {
        PlumaError::Database(e.to_string())
    }
}

/// Result type alias for Pluma operations.
pub type Result<T> = std::result::Result<T, PlumaError>;
