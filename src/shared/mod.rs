//! Shared Module
//!
//! This module contains types that do not depend on the HTTP server: the
//! validation error used by request parsing and the application
//! configuration.
//!
//! # Overview
//!
//! Nothing in here touches a database or a socket, so these types can be
//! used from the binary, the backend and the tests alike.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
