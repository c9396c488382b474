//! Workboard - Main Library
//!
//! Workboard is a multi-user workspace backend: users register, log in and
//! manage boards and the lists on them through a session-gated REST API.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Validation errors
//!   - Application configuration
//!
//! - **`backend`** - The Axum HTTP server
//!   - Password hashing and session lifecycle
//!   - Authentication gate and ownership policies
//!   - Board/list handlers and their stores
//!
//! # Usage
//!
//! ```rust,no_run
//! use workboard::backend::server::create_app;
//! use workboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for input validation
//! - `backend::error::BackendError` for everything a handler can return;
//!   component errors (`HashError`, `SessionError`, `StoreError`,
//!   `PolicyError`) convert into it with `?`

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
