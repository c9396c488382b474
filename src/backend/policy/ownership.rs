/**
 * Resource Ownership Store
 *
 * Answers one question: does this user own this resource? Ownership is
 * derived from the data on every call, never cached. Nested resources
 * resolve their owner through the ancestor chain (a list belongs to whoever
 * owns its board).
 */

use std::fmt;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::error::StoreError;

/// Resource types subject to ownership checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Board,
    List,
}

impl ResourceKind {
    /// Lower-case name used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Board => "board",
            ResourceKind::List => "list",
        }
    }

    /// Existence query taking `$1 = resource id`, `$2 = owner id`
    fn exists_query(self) -> &'static str {
        match self {
            ResourceKind::Board => {
                "SELECT EXISTS(SELECT 1 FROM boards WHERE id = $1 AND user_id = $2)"
            }
            ResourceKind::List => {
                r#"SELECT EXISTS(
                    SELECT 1 FROM lists l
                    JOIN boards b ON b.id = l.board_id
                    WHERE l.id = $1 AND b.user_id = $2
                )"#
            }
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ownership lookups
#[async_trait]
pub trait OwnershipStore: Send + Sync {
    /// True iff `resource_id` of `kind` exists and is owned by `owner_id`
    async fn owns(&self, kind: ResourceKind, resource_id: i64, owner_id: i64) -> Result<bool, StoreError>;
}

/// PostgreSQL-backed ownership lookups
#[derive(Debug, Clone)]
pub struct PgOwnershipStore {
    pool: PgPool,
}

impl PgOwnershipStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnershipStore for PgOwnershipStore {
    async fn owns(&self, kind: ResourceKind, resource_id: i64, owner_id: i64) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(kind.exists_query())
            .bind(resource_id)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
