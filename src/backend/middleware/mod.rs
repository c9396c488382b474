//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! # Architecture
//!
//! - **`auth`** - Authentication gate for protected routes and the
//!   `AuthUser` extractor handlers use to read the caller
//!
//! Request-wide concerns (tracing, deadline, body limit, CORS) are
//! `tower-http` layers applied in `routes::router`.

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser, AuthenticationGate};
