/**
 * Server Initialization
 *
 * This module builds the application state and the router.
 *
 * # Initialization Process
 *
 * 1. Connect the database if one is configured
 * 2. Pick PostgreSQL or in-memory stores
 * 3. Wire the hasher, session manager and policies into `AppState`
 * 4. Create the router with all routes and layers
 */

use axum::Router;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::{AppState, Stores};
use crate::shared::AppConfig;

/// Build the application state from the configuration
pub async fn build_state(config: AppConfig) -> AppState {
    let stores = match load_database(&config).await {
        Some(pool) => Stores::postgres(pool),
        None => Stores::in_memory(),
    };

    AppState::new(config, PasswordHasher::new(), stores)
}

/// Create and configure the Axum application
///
/// # Error Handling
///
/// A missing or unreachable database does not fail startup; the server
/// falls back to in-memory stores.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing workboard server");

    let state = build_state(config).await;
    let app = create_router(state);

    tracing::info!("Router configured");
    app
}
