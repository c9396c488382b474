/**
 * Backend Error Types
 *
 * This module defines the errors raised by the HTTP layer and by the storage
 * collaborators behind it.
 *
 * # Error Types
 *
 * - `BackendError` - what a handler returns; maps onto a status code and a
 *   client-safe message
 * - `StoreError` - failures of the relational and key-value stores
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` (400) - malformed or oversized input, carries the violated rule
 * - `Unauthenticated` (401) - one uniform body whatever check failed
 * - `NotFound` (404) - also used when the caller does not own the resource
 * - `Conflict` (409) - e.g. an email that is already registered
 *
 * ## Server Errors
 *
 * - `Internal` (500) - storage, hashing or session faults. The detail is kept
 *   for the logs; the client only ever sees `internal server error`.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Message returned for every 401
pub const UNAUTHENTICATED_MESSAGE: &str = "unauthenticated";

/// Message returned for every 500
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use workboard::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("board not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
///
/// let err = BackendError::internal("connection reset by peer");
/// assert_eq!(err.message(), "internal server error");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request input broke a validation rule
    #[error("validation failed: {0}")]
    Validation(String),

    /// No valid session accompanies the request
    #[error("unauthenticated")]
    Unauthenticated,

    /// Resource absent, or present but not owned by the caller
    #[error("not found: {0}")]
    NotFound(String),

    /// Request conflicts with existing state
    #[error("conflict: {0}")]
    Conflict(String),

    /// Server-side fault
    ///
    /// The string is diagnostic detail for the logs and is never sent to
    /// the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Create a validation error carrying the violated rule
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create an internal error with diagnostic detail
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message that is safe to show the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Conflict(message) => {
                message.clone()
            }
            Self::Unauthenticated => UNAUTHENTICATED_MESSAGE.to_string(),
            Self::Internal(_) => INTERNAL_MESSAGE.to_string(),
        }
    }
}

/// Storage collaborator errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database driver reported an error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A user with this email already exists
    #[error("email is already taken")]
    DuplicateEmail,
}
