//! Backend Module
//!
//! This module contains all server-side code for Workboard.
//!
//! # Architecture
//!
//! - **`server`** - Application state, database loading, app creation
//! - **`routes`** - Route configuration and request-wide layers
//! - **`auth`** - Password hashing, sessions, credentials, `/auth` handlers
//! - **`middleware`** - Authentication gate
//! - **`policy`** - Ownership-based authorization
//! - **`workspace`** - Boards, lists and their handlers
//! - **`error`** - Backend error types and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs        - Module exports and documentation
//! ├── main.rs       - Server binary
//! ├── server/       - Server initialization and state
//! ├── routes/       - Route configuration
//! ├── auth/         - Authentication
//! ├── middleware/   - Request middleware
//! ├── policy/       - Authorization policies
//! ├── workspace/    - Boards and lists
//! └── error/        - Error types
//! ```
//!
//! # Request Flow
//!
//! 1. Request-wide layers: tracing, CORS, deadline, body limit
//! 2. Protected routes: the authentication gate resolves the session cookie
//!    to an `AuthenticatedUser`
//! 3. The handler asks the resource's policy, mapping a denial to 404
//! 4. The handler calls the store and returns JSON or a `BackendError`

/// Server initialization and state management
pub mod server;

/// HTTP route configuration
pub mod routes;

/// Authentication and session management
pub mod auth;

/// Request processing middleware
pub mod middleware;

/// Authorization policies
pub mod policy;

/// Boards and lists
pub mod workspace;

/// Backend error types
pub mod error;
