/**
 * Current User Handler
 *
 * GET /auth/user (behind the authentication gate)
 */

use axum::response::Json;

use crate::backend::middleware::{AuthUser, AuthenticatedUser};

/// Return the caller as resolved by the authentication gate
pub async fn get_me(AuthUser(user): AuthUser) -> Json<AuthenticatedUser> {
    Json(user)
}
