//! Authentication Handlers Module
//!
//! This module contains the HTTP handlers for the `/auth` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request/response types and validation
//! ├── register.rs - POST /auth/register
//! ├── login.rs    - POST /auth/login
//! ├── logout.rs   - POST /auth/logout
//! └── me.rs       - GET /auth/user
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → credential stored → 201 with the user
//! 2. **Login**: email and password verified → session created → `auth_session` cookie
//! 3. **User**: cookie resolved by the gate → the authenticated user
//! 4. **Logout**: session revoked → cookie expired

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, MessageResponse, RegisterRequest, UserResponse};

pub use login::login;
pub use logout::logout;
pub use me::get_me;
pub use register::register;
