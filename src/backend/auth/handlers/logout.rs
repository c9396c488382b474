/**
 * Logout Handler
 *
 * POST /auth/logout (behind the authentication gate)
 */

use axum::{
    extract::State,
    http::{header, HeaderMap, Uri},
    response::Json,
};

use crate::backend::auth::cookie::{cleared_session_cookie, is_secure_request, read_session_token};
use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

/// Logout handler
///
/// Revokes the session named by the cookie and expires the cookie.
///
/// # Errors
///
/// * `500 Internal Server Error` - the session store could not delete the key
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    uri: Uri,
    headers: HeaderMap,
) -> Result<(HeaderMap, Json<MessageResponse>), BackendError> {
    let token = read_session_token(&headers).ok_or(BackendError::Unauthenticated)?;

    state.sessions.revoke(&token).await.map_err(|e| {
        tracing::error!(user_id = user.id, error = %e, "Failed to revoke session");
        e
    })?;

    let secure = is_secure_request(state.config.cookie_secure, &uri, &headers);
    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::SET_COOKIE, cleared_session_cookie(secure));

    tracing::info!(user_id = user.id, "User logged out");
    Ok((response_headers, Json(MessageResponse::new("logged out successfully"))))
}
