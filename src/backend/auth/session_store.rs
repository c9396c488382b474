/**
 * Session Key-Value Stores
 *
 * `SessionManager` only needs three operations from its store: set a key
 * with a time-to-live, read a live key, and delete a key. Expiry belongs to
 * the store; an expired key reads exactly like an absent one.
 *
 * # Backends
 *
 * - `PgSessionStore` - rows in the `kv_store` table, filtered on
 *   `expires_at` when read
 * - `MemorySessionStore` - a process-local map, for running without a
 *   database and for tests
 *
 * Both backends purge every expired key on each `set`, so keys that expire
 * unread do not accumulate. There is no background sweep.
 */

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::PgPool;

use crate::backend::error::StoreError;

/// Key-value store with per-key expiry
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value, for `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError>;

    /// Read a key; `None` if it is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete a key; deleting an absent key succeeds
    async fn del(&self, key: &str) -> Result<(), StoreError>;
}

/// PostgreSQL-backed session store
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, expires_at)
            VALUES ($1, $2, NOW() + make_interval(secs => $3))
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(ttl.as_secs_f64())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM kv_store WHERE key = $1 AND expires_at > NOW()",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, expired ones included until the next `set`
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, (_, deadline)| *deadline > now);
        entries.insert(key.to_string(), (value.to_string(), now + ttl));
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((value, deadline)) if Instant::now() < *deadline => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
