/**
 * Error Conversion
 *
 * This module converts component errors into `BackendError` and
 * `BackendError` into HTTP responses.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "board not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::auth::password::HashError;
use crate::backend::auth::sessions::SessionError;
use crate::backend::error::types::{BackendError, StoreError};
use crate::backend::policy::PolicyError;
use crate::shared::SharedError;

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Internal detail is logged here and replaced by a generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let BackendError::Internal(detail) = &self {
            tracing::error!(error = %detail, "Request failed with internal error");
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        BackendError::Validation(err.client_message())
    }
}

impl From<JsonRejection> for BackendError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Failed to decode request body");
        SharedError::serialization(rejection.body_text()).into()
    }
}

impl From<HashError> for BackendError {
    fn from(err: HashError) -> Self {
        BackendError::Internal(err.to_string())
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => BackendError::Conflict(err.to_string()),
            StoreError::Database(_) => BackendError::Internal(err.to_string()),
        }
    }
}

impl From<SessionError> for BackendError {
    fn from(err: SessionError) -> Self {
        BackendError::Internal(err.to_string())
    }
}

impl From<PolicyError> for BackendError {
    fn from(err: PolicyError) -> Self {
        BackendError::Internal(err.to_string())
    }
}
