/**
 * Board Routes
 *
 * All routes require authentication.
 *
 * - `GET /boards` - The caller's boards
 * - `POST /boards` - Create a board
 * - `GET|PUT|DELETE /boards/{id}` - Read, replace or delete a board
 * - `GET /boards/{id}/lists` - Lists on a board
 * - `GET /boards/{id}/lists/{list_id}` - One list on a board
 */

use axum::{middleware, routing::get, Router};

use crate::backend::middleware::require_auth;
use crate::backend::server::state::AppState;
use crate::backend::workspace::handlers::{destroy, index, list_index, list_show, show, store, update};

/// Configure board and list routes
pub fn configure_board_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/boards", get(index).post(store))
        .route("/boards/{id}", get(show).put(update).delete(destroy))
        .route("/boards/{id}/lists", get(list_index))
        .route("/boards/{id}/lists/{list_id}", get(list_show))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}
