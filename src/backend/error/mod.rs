//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and can be converted to HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` and `StoreError` definitions
//! - **`conversion`** - `From` conversions from component errors and `IntoResponse`
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` on hasher, session, store and
//! policy results. Storage and crypto failures become a 500 whose body never
//! contains the underlying error text.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, StoreError};
