/**
 * Server Configuration
 *
 * This module connects the optional PostgreSQL database.
 *
 * # Error Handling
 *
 * Database problems are logged but do not prevent server startup. Without
 * a pool the server runs on in-memory stores, and all accounts and sessions
 * are lost on restart.
 */

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads the database URL from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is connected
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Running on in-memory stores.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(config.request_timeout)
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create database connection pool");
            tracing::warn!("Running on in-memory stores.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to run database migrations");
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
