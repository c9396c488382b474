//! Shared Error Types
//!
//! This module defines the error raised when request input breaks one of the
//! validation rules, plus the error for bodies that cannot be decoded at all.
//!
//! # Error Categories
//!
//! - `SerializationError` - the request body is not valid JSON for the endpoint
//! - `ValidationError` - a field is missing, too long, too short or malformed
//!
//! # Usage
//!
//! ```rust
//! use workboard::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "email must be a valid email");
//! assert_eq!(error.client_message(), "email must be a valid email");
//! ```
//!
//! The message of a `ValidationError` is written for the client and is
//! returned verbatim in the 400 body. Serialization details are not: the
//! client only ever sees `invalid request`.
use thiserror::Error;

/// Shared error types for request input
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message (server-side only)
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// The violated rule, phrased for the client
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The text that may be shown to the client.
    pub fn client_message(&self) -> String {
        match self {
            Self::SerializationError { .. } => "invalid request".to_string(),
            Self::ValidationError { message, .. } => message.clone(),
        }
    }
}

/// Helper trait for converting serialization errors
impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
