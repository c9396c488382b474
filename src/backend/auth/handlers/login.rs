/**
 * Login Handler
 *
 * POST /auth/login
 *
 * # Authentication Process
 *
 * 1. Look up the user by (lower-cased) email
 * 2. Verify the password against the stored hash
 * 3. Start a session and set the `auth_session` cookie
 *
 * An unknown email and a wrong password get the same 400, so the endpoint
 * does not reveal which emails are registered.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, Uri},
    response::Json,
};

use crate::backend::auth::cookie::{is_secure_request, session_cookie};
use crate::backend::auth::handlers::types::{LoginRequest, MessageResponse};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "username or password is invalid";

/// Login handler
///
/// # Returns
///
/// `{"message": "logged in successfully"}` with
/// `Set-Cookie: auth_session=<token>; Path=/; Max-Age=86400; HttpOnly; SameSite=Lax`
///
/// # Errors
///
/// * `400 Bad Request` - broken validation rule, unknown email or wrong password
/// * `500 Internal Server Error` - storage or session failure, or a stored
///   hash that cannot be parsed
pub async fn login(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<MessageResponse>), BackendError> {
    let Json(request) = payload?;
    let attempt = request.validate()?;

    let credential = state
        .credentials
        .get_user_by_email(&attempt.email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to get user by email");
            e
        })?
        .ok_or_else(|| {
            tracing::info!("Login attempt for unknown email");
            BackendError::validation(INVALID_CREDENTIALS)
        })?;

    let valid = state
        .hasher
        .verify_async(attempt.password, credential.password_hash)
        .await
        .map_err(|e| {
            tracing::error!(user_id = credential.id, error = %e, "Password verification failed");
            e
        })?;

    if !valid {
        tracing::info!(user_id = credential.id, "Login attempt with wrong password");
        return Err(BackendError::validation(INVALID_CREDENTIALS));
    }

    let token = state.sessions.create(credential.id).await.map_err(|e| {
        tracing::error!(user_id = credential.id, error = %e, "Failed to create session");
        e
    })?;

    let secure = is_secure_request(state.config.cookie_secure, &uri, &headers);
    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::SET_COOKIE,
        session_cookie(&token, state.sessions.ttl_secs(), secure)?,
    );

    tracing::info!(user_id = credential.id, "User logged in");
    Ok((response_headers, Json(MessageResponse::new("logged in successfully"))))
}
