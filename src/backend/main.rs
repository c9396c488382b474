/**
 * Workboard Server Entry Point
 *
 * Loads `.env`, initialises tracing, reads the configuration and serves the
 * Axum app.
 */

use tracing_subscriber::EnvFilter;

use workboard::backend::server::create_app;
use workboard::shared::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env()?;
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));

    let app = create_app(config).await;

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
