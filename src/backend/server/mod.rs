//! Server Module
//!
//! This module contains the code that assembles the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - `AppState` and the `Stores` it is built from
//! - **`config`** - Database connection and migrations
//! - **`init`** - State construction and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and Stores
//! ├── config.rs - Database loading
//! └── init.rs   - Server initialization and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use workboard::backend::server::create_app;
//! use workboard::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_state, create_app};
pub use state::{AppState, Stores};
