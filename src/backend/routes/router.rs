/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router and applies the
 * request-wide layers.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer` - the configured frontend origin, credentials allowed
 * 3. `TimeoutLayer` - 408 once the request deadline passes; dropping the
 *    handler future cancels its pending store calls
 * 4. `RequestBodyLimitLayer` - bodies over 64 KiB are rejected with 413
 */

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    Router,
};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::board_routes::configure_board_routes;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Maximum accepted request body size in bytes
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the Axum router with all routes configured
///
/// # Route Details
///
/// ## Auth Routes
///
/// - `POST /auth/register`, `POST /auth/login`
/// - `POST /auth/logout`, `GET /auth/user` (gated)
///
/// ## Board Routes (gated)
///
/// - `GET|POST /boards`
/// - `GET|PUT|DELETE /boards/{id}`
/// - `GET /boards/{id}/lists`, `GET /boards/{id}/lists/{list_id}`
///
/// ## Fallback
///
/// Unknown routes get a JSON 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = Router::new()
        .merge(configure_auth_routes(&app_state))
        .merge(configure_board_routes(&app_state))
        .fallback(|| async { BackendError::not_found("not found") })
        .with_state(app_state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ));

    let router = match cors_layer(&config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// CORS for the frontend origin
///
/// Returns `None` (no CORS headers at all) if the origin is not a valid
/// header value.
fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    let origin = config.frontend_url.trim().trim_end_matches('/');
    let origin = match HeaderValue::from_str(origin) {
        Ok(origin) => origin,
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid FRONTEND_URL, CORS disabled");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true),
    )
}
