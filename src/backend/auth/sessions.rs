/**
 * Session Management
 *
 * This module issues, validates and revokes opaque session tokens.
 *
 * A token is 32 bytes from the OS random source, encoded as URL-safe base64
 * without padding. It carries no user data; the user id lives in the session
 * store under `session:<token>` and disappears when the store expires it
 * (24 hours after login) or when the session is revoked.
 */

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

use crate::backend::auth::session_store::SessionStore;
use crate::backend::error::StoreError;

/// Number of random bytes in a session token
pub const TOKEN_BYTES: usize = 32;

/// Lifetime of a session
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const KEY_PREFIX: &str = "session:";

/// Session lifecycle errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// No live session exists for the token
    #[error("session not found")]
    SessionNotFound,

    /// The stored value is not a user id
    #[error("session value is not a valid user id")]
    CorruptSession,

    /// The OS random source failed
    #[error("secure randomness unavailable: {0}")]
    RandomnessFailure(String),

    /// The session store failed
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

/// Store key for a token
pub fn session_key(token: &str) -> String {
    format!("{KEY_PREFIX}{token}")
}

/// Issues and checks session tokens against a `SessionStore`
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("ttl", &self.ttl).finish()
    }
}

impl SessionManager {
    /// Manager issuing sessions that live for 24 hours
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self::with_ttl(store, SESSION_TTL)
    }

    /// Manager issuing sessions with a custom lifetime
    pub fn with_ttl(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Session lifetime in whole seconds, as used for the cookie `Max-Age`
    pub fn ttl_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Start a session for a user
    ///
    /// # Arguments
    /// * `user_id` - Id of the user that just authenticated
    ///
    /// # Returns
    /// The new session token
    ///
    /// # Errors
    /// * `RandomnessFailure` - the OS random source failed
    /// * `Store` - the token could not be written
    pub async fn create(&self, user_id: i64) -> Result<String, SessionError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::fill(&mut bytes).map_err(|e| SessionError::RandomnessFailure(e.to_string()))?;
        let token = URL_SAFE_NO_PAD.encode(bytes);

        self.store
            .set(&session_key(&token), &user_id.to_string(), self.ttl)
            .await?;

        Ok(token)
    }

    /// Resolve a token to the user id it was issued for
    ///
    /// # Errors
    /// * `SessionNotFound` - no live session (never issued, revoked or expired)
    /// * `CorruptSession` - the stored value does not parse as a user id
    /// * `Store` - the store could not be read
    pub async fn validate(&self, token: &str) -> Result<i64, SessionError> {
        let value = self
            .store
            .get(&session_key(token))
            .await?
            .ok_or(SessionError::SessionNotFound)?;

        value
            .trim()
            .parse::<i64>()
            .map_err(|_| SessionError::CorruptSession)
    }

    /// End a session. Revoking an unknown token succeeds.
    pub async fn revoke(&self, token: &str) -> Result<(), SessionError> {
        self.store.del(&session_key(token)).await?;
        Ok(())
    }
}
