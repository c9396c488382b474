//! Authentication Module
//!
//! This module handles credentials, sessions and the `/auth` endpoints.
//!
//! # Architecture
//!
//! - **`password`** - Argon2id hashing and verification (`PasswordHasher`)
//! - **`sessions`** - opaque session tokens (`SessionManager`)
//! - **`session_store`** - key-value stores with expiry backing the sessions
//! - **`users`** - the `Credential` record and `CredentialStore`
//! - **`cookie`** - reading and writing the `auth_session` cookie
//! - **`handlers`** - HTTP handlers
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs           - Module exports and documentation
//! ├── password.rs      - Password hashing
//! ├── sessions.rs      - Session lifecycle
//! ├── session_store.rs - PostgreSQL and in-memory KV stores
//! ├── users.rs         - Credential model and stores
//! ├── cookie.rs        - Session cookie helpers
//! └── handlers/        - register, login, logout, user
//! ```
//!
//! # Security
//!
//! - Passwords are stored only as salted Argon2id hashes
//! - Session tokens carry 256 bits of OS randomness and no user data
//! - Sessions expire 24 hours after login and are deleted on logout
//! - The cookie is `HttpOnly` and `SameSite=Lax`, and `Secure` over TLS

/// Password hashing
pub mod password;

/// Session lifecycle
pub mod sessions;

/// Session key-value stores
pub mod session_store;

/// Credential model and stores
pub mod users;

/// Session cookie helpers
pub mod cookie;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use password::{HashError, HashParams, PasswordHasher};
pub use session_store::{MemorySessionStore, PgSessionStore, SessionStore};
pub use sessions::{SessionError, SessionManager};
pub use users::{Credential, CredentialStore, MemoryCredentialStore, PgCredentialStore};
