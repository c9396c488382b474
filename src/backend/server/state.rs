/**
 * Application State Management
 *
 * This module defines the application state structure shared by every
 * handler and the set of stores it is built from.
 *
 * # Architecture
 *
 * `AppState` holds explicitly constructed collaborators, never globals:
 * - the configuration
 * - the password hasher and session manager
 * - the credential and board stores
 * - one ownership policy per resource type
 *
 * Stores sit behind trait objects, so the same state runs on PostgreSQL in
 * production and on in-memory stores without a database or under test.
 *
 * # State Extraction
 *
 * Handlers take `State<AppState>`. The authentication gate only needs a
 * slice of it and extracts `AuthenticationGate` through `FromRef`.
 */

use std::sync::Arc;

use sqlx::PgPool;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::session_store::{MemorySessionStore, PgSessionStore, SessionStore};
use crate::backend::auth::sessions::SessionManager;
use crate::backend::auth::users::{CredentialStore, MemoryCredentialStore, PgCredentialStore};
use crate::backend::policy::{OwnershipPolicy, OwnershipStore, PgOwnershipStore, Policy, ResourceKind};
use crate::backend::workspace::store::{BoardStore, MemoryWorkspaceStore, PgBoardStore};
use crate::shared::AppConfig;

/// The storage collaborators the application is built from
#[derive(Clone)]
pub struct Stores {
    pub sessions: Arc<dyn SessionStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub boards: Arc<dyn BoardStore>,
    pub ownership: Arc<dyn OwnershipStore>,
}

impl Stores {
    /// Stores backed by one PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            sessions: Arc::new(PgSessionStore::new(pool.clone())),
            credentials: Arc::new(PgCredentialStore::new(pool.clone())),
            boards: Arc::new(PgBoardStore::new(pool.clone())),
            ownership: Arc::new(PgOwnershipStore::new(pool)),
        }
    }

    /// Process-local stores; nothing survives a restart
    pub fn in_memory() -> Self {
        let workspace = Arc::new(MemoryWorkspaceStore::new());
        Self {
            sessions: Arc::new(MemorySessionStore::new()),
            credentials: Arc::new(MemoryCredentialStore::new()),
            boards: workspace.clone(),
            ownership: workspace,
        }
    }
}

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<AppConfig>,
    /// Password hasher
    pub hasher: PasswordHasher,
    /// Session lifecycle
    pub sessions: SessionManager,
    /// Credential Store
    pub credentials: Arc<dyn CredentialStore>,
    /// Board and list persistence
    pub boards: Arc<dyn BoardStore>,
    /// Authorization for boards
    pub board_policy: Arc<dyn Policy>,
    /// Authorization for lists (owned through their board)
    pub list_policy: Arc<dyn Policy>,
}

impl AppState {
    /// Wire the state together from its stores
    pub fn new(config: AppConfig, hasher: PasswordHasher, stores: Stores) -> Self {
        Self {
            config: Arc::new(config),
            hasher,
            sessions: SessionManager::new(stores.sessions),
            credentials: stores.credentials,
            boards: stores.boards,
            board_policy: Arc::new(OwnershipPolicy::new(ResourceKind::Board, stores.ownership.clone())),
            list_policy: Arc::new(OwnershipPolicy::new(ResourceKind::List, stores.ownership)),
        }
    }

    /// Replace the session manager (e.g. to shorten the session lifetime)
    pub fn with_sessions(mut self, sessions: SessionManager) -> Self {
        self.sessions = sessions;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("hasher", &self.hasher)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
