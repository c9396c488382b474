/**
 * Register Handler
 *
 * POST /auth/register
 *
 * # Registration Process
 *
 * 1. Decode and validate the body (first broken rule wins, 400)
 * 2. Hash the password on the blocking pool
 * 3. Insert the credential; an existing email is a 409
 * 4. Return the new user without the hash (201)
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::error::{BackendError, StoreError};
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - undecodable body or a broken validation rule
/// * `409 Conflict` - `email is already taken`
/// * `500 Internal Server Error` - hashing or storage failure
///
/// # Example Request
///
/// ```http
/// POST /auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Ann",
///   "email": "ann@example.com",
///   "password": "longenough1",
///   "password_confirmation": "longenough1"
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    let Json(request) = payload?;
    let new_user = request.validate()?;

    let password_hash = state.hasher.hash_async(new_user.password).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to hash password");
        e
    })?;

    let credential = state
        .credentials
        .create_user(&new_user.name, &new_user.email, &password_hash)
        .await
        .map_err(|e| {
            match &e {
                StoreError::DuplicateEmail => tracing::info!("Registration with an email that is already taken"),
                StoreError::Database(_) => tracing::error!(error = %e, "Failed to create user"),
            }
            e
        })?;

    tracing::info!(user_id = credential.id, "User registered");
    Ok((StatusCode::CREATED, Json(credential.into())))
}
