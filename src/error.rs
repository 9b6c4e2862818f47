//! Error types for session-tracker.

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for session-tracker operations.
#[derive(Error, Debug)]
pub enum SessionTrackerError {
    /// Required input was missing or blank.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionTrackerError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Self::LockPoisoned | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Convenience Result type for session-tracker operations.
pub type Result<T> = std::result::Result<T, SessionTrackerError>;
