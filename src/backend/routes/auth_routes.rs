/**
 * Authentication Routes
 *
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login, sets the session cookie
 * - `POST /auth/logout` - End the session (requires authentication)
 * - `GET /auth/user` - Get the current user (requires authentication)
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{get_me, login, logout, register};
use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;

/// Configure authentication routes
///
/// Register and login are public. Logout and the current-user endpoint sit
/// behind the authentication gate.
pub fn configure_auth_routes(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/user", get(get_me))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .merge(protected)
}
