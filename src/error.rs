//! Error taxonomy shared by every request path.
//!
//! Each variant maps to one HTTP status class in [`crate::server`]. Only
//! `Validation`, `NotFound` and `Rejected` messages ever reach a client.

use thiserror::Error;

use crate::ai::GeneratorError;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller-fixable input problem (400).
    #[error("{0}")]
    Validation(String),

    /// Target resource does not exist (404).
    #[error("{0}")]
    NotFound(String),

    /// Authentication failed (401).
    #[error("{0}")]
    Rejected(String),

    /// Anything else, including downstream faults (500).
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Internal(format!("database error: {}", e))
    }
}

impl From<GeneratorError> for Error {
    fn from(e: GeneratorError) -> Self {
        Self::Internal(format!("generator error: {}", e))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(format!("background task failed: {}", e))
    }
}

impl From<recipebox_core::ValidationError> for Error {
    fn from(e: recipebox_core::ValidationError) -> Self {
        Self::Validation(e.to_string())
    }
}
