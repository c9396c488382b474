//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by area into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and request-wide layers
//! ├── auth_routes.rs  - /auth endpoints
//! └── board_routes.rs - /boards endpoints
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use workboard::backend::routes::create_router;
//! use workboard::backend::server::{AppState, Stores};
//! use workboard::backend::auth::PasswordHasher;
//! use workboard::shared::AppConfig;
//!
//! let state = AppState::new(AppConfig::default(), PasswordHasher::new(), Stores::in_memory());
//! let router = create_router(state);
//! # let _ = router;
//! ```

/// Main router creation
pub mod router;

/// Authentication routes
pub mod auth_routes;

/// Board and list routes
pub mod board_routes;

// Re-export commonly used functions
pub use router::create_router;
