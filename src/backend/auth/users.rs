/**
 * Credential Store
 *
 * This module holds the user record and the store that persists it. A
 * credential is written once at registration and only read afterwards
 * (by email at login, by id on every authenticated request).
 *
 * `password_hash` is the encoded Argon2id string; the plaintext is never
 * stored and `Credential` is not serializable, so the hash cannot leak into
 * a response body by accident.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sqlx::PgPool;

use crate::backend::error::StoreError;

/// A registered user
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credential {
    /// Unique user ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Email address (stored lower-cased, unique)
    pub email: String,
    /// Encoded password hash
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Persistence for credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user
    ///
    /// # Errors
    /// * `DuplicateEmail` - a user with this email already exists
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError>;

    /// Look a user up by email
    async fn get_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError>;

    /// Look a user up by id
    async fn get_user_by_id(&self, id: i64) -> Result<Option<Credential>, StoreError>;
}

/// PostgreSQL-backed credential store
#[derive(Debug, Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let now = Utc::now();

        let user = sqlx::query_as::<_, Credential>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(insert_error)?;

        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        let user = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<Credential>, StoreError> {
        let user = sqlx::query_as::<_, Credential>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// In-process credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: Mutex<Vec<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<Credential, StoreError> {
        let mut users = self.users.lock();
        if users.iter().any(|user| user.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = Credential {
            id: users.len() as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<Credential>, StoreError> {
        Ok(self.users.lock().iter().find(|user| user.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<Credential>, StoreError> {
        Ok(self.users.lock().iter().find(|user| user.id == id).cloned())
    }
}
