//! Authorization Policy Module
//!
//! One policy object per resource type decides whether the authenticated
//! user may view, create, update or delete a resource.
//!
//! # Decisions
//!
//! - **create** is always allowed: the new resource is owned by its creator
//! - **view / update / delete** run one existence query filtered by resource
//!   id and owner id
//!
//! A `false` decision does not say whether the resource exists. Handlers turn
//! it into a 404, never a 403, so non-owners cannot probe for ids.
//!
//! A failed lookup is a `PolicyError`, not a denial; handlers surface it as a
//! 500.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use workboard::backend::middleware::AuthenticatedUser;
//! use workboard::backend::policy::{OwnershipPolicy, Policy, ResourceKind};
//! use workboard::backend::workspace::MemoryWorkspaceStore;
//!
//! # async fn example(user: AuthenticatedUser) -> Result<(), Box<dyn std::error::Error>> {
//! let boards = OwnershipPolicy::new(ResourceKind::Board, Arc::new(MemoryWorkspaceStore::new()));
//! if !boards.can_view(&user, 5).await? {
//!     // respond 404 "board not found"
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::error::StoreError;
use crate::backend::middleware::AuthenticatedUser;

/// Resource ownership lookups
pub mod ownership;

pub use ownership::{OwnershipStore, PgOwnershipStore, ResourceKind};

/// Authorization errors
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The ownership query failed
    #[error("ownership lookup failed for {resource} {resource_id} (user {user_id}): {source}")]
    LookupFailure {
        resource: &'static str,
        resource_id: i64,
        user_id: i64,
        #[source]
        source: StoreError,
    },
}

/// Per-resource-type authorization decisions
#[async_trait]
pub trait Policy: Send + Sync {
    /// May the user read the resource?
    async fn can_view(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError>;

    /// May the user create a resource?
    ///
    /// `resource_id` is the parent the resource is created under, or 0 for
    /// top-level resources. Creation assigns the caller as owner, so the
    /// default allows it.
    async fn can_create(&self, _user: &AuthenticatedUser, _resource_id: i64) -> Result<bool, PolicyError> {
        Ok(true)
    }

    /// May the user modify the resource?
    async fn can_update(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError>;

    /// May the user delete the resource?
    async fn can_delete(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError>;
}

/// Owner-only access to one resource type
#[derive(Clone)]
pub struct OwnershipPolicy {
    kind: ResourceKind,
    store: Arc<dyn OwnershipStore>,
}

impl std::fmt::Debug for OwnershipPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipPolicy").field("kind", &self.kind).finish()
    }
}

impl OwnershipPolicy {
    pub fn new(kind: ResourceKind, store: Arc<dyn OwnershipStore>) -> Self {
        Self { kind, store }
    }

    async fn is_owner(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError> {
        self.store
            .owns(self.kind, resource_id, user.id)
            .await
            .map_err(|source| {
                tracing::error!(
                    resource = self.kind.name(),
                    resource_id,
                    user_id = user.id,
                    error = %source,
                    "Ownership lookup failed"
                );
                PolicyError::LookupFailure {
                    resource: self.kind.name(),
                    resource_id,
                    user_id: user.id,
                    source,
                }
            })
    }
}

#[async_trait]
impl Policy for OwnershipPolicy {
    async fn can_view(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError> {
        self.is_owner(user, resource_id).await
    }

    async fn can_update(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError> {
        self.is_owner(user, resource_id).await
    }

    async fn can_delete(&self, user: &AuthenticatedUser, resource_id: i64) -> Result<bool, PolicyError> {
        self.is_owner(user, resource_id).await
    }
}
