//! # AppError
//!
//! Centralized error taxonomy for the blog backend.
//! Maps domain-specific failures to actionable error types; the HTTP
//! status mapping lives in the api-adapters crate.

use thiserror::Error;

/// The primary error type for all workflow operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing/malformed input, oversized upload, unknown category
    #[error("validation error: {0}")]
    Validation(String),

    /// No bearer token on a protected operation
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Invalid/expired token, or a non-owner mutating a post
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Credential check failed (login, current-password verification)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found (e.g. User, Post)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// Infrastructure failure (store or blob I/O)
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for workflow logic.
pub type Result<T> = std::result::Result<T, AppError>;

// Adapter ports report opaque infrastructure failures as anyhow errors;
// at the workflow layer those are all Internal.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
