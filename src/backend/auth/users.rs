/**
 * Identities and the Credential Store
 *
 * This module holds the account model and the storage contract the auth
 * core relies on. Two implementations exist:
 *
 * - `PgCredentialStore` - the `users` table (unique username and email)
 * - `MemoryCredentialStore` - a vector behind a mutex, for tests and
 *   database-less runs
 *
 * # Admin quota
 *
 * `insert` receives the admin cap and enforces it atomically with the write.
 * The Postgres store serializes admin inserts with a transaction-scoped
 * advisory lock and recounts inside the transaction; the memory store checks
 * and inserts under one lock. Callers may pre-check, but the store decides.
 */

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::backend::store::{StoreError, StoreResult};

/// Advisory lock key serializing admin signups
const ADMIN_QUOTA_LOCK: i64 = 0x0ad3_1a70;

/// A registered account
#[derive(Clone, sqlx::FromRow)]
pub struct Identity {
    pub id: Uuid,
    /// Unique, at least 3 characters
    pub username: String,
    /// Unique, valid address
    pub email: String,
    /// Bcrypt hash; never serialized or logged
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl Identity {
    /// Public view, safe to return to clients
    pub fn view(&self) -> IdentityView {
        IdentityView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Identity without the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct IdentityView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

/// Input for [`CredentialStore::insert`]
#[derive(Clone)]
pub struct NewIdentity {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("is_admin", &self.is_admin)
            .finish_non_exhaustive()
    }
}

/// Persistence contract for identities
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Any identity holding either the username or the email
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<Identity>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Identity>>;

    /// Resolve an id to its public view
    async fn find_view_by_id(&self, id: Uuid) -> StoreResult<Option<IdentityView>>;

    async fn count_admins(&self) -> StoreResult<i64>;

    /// Persist a new identity.
    ///
    /// Fails with [`StoreError::Duplicate`] when the username or email is
    /// taken, and with [`StoreError::AdminQuotaExceeded`] when an admin is
    /// requested and `admin_limit` admins already exist.
    async fn insert(&self, identity: NewIdentity, admin_limit: i64) -> StoreResult<Identity>;
}

/// PostgreSQL credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<Identity>> {
        let user = sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, username, email, password_hash, is_admin, created_at, updated_at
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Identity>> {
        let user = sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, username, email, password_hash, is_admin, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_view_by_id(&self, id: Uuid) -> StoreResult<Option<IdentityView>> {
        let user = sqlx::query_as::<_, IdentityView>(
            r#"
            SELECT id, username, email, is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn count_admins(&self) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_admin")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(&self, identity: NewIdentity, admin_limit: i64) -> StoreResult<Identity> {
        let mut tx = self.pool.begin().await?;

        if identity.is_admin {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(ADMIN_QUOTA_LOCK)
                .execute(&mut *tx)
                .await?;

            let (admins,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE is_admin")
                .fetch_one(&mut *tx)
                .await?;

            if admins >= admin_limit {
                // dropping tx rolls back and releases the lock
                return Err(StoreError::AdminQuotaExceeded);
            }
        }

        let now = Utc::now();
        let user = sqlx::query_as::<_, Identity>(
            r#"
            INSERT INTO users (id, username, email, password_hash, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, username, email, password_hash, is_admin, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&identity.username)
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(identity.is_admin)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(StoreError::from_insert)?;

        tx.commit().await?;
        Ok(user)
    }
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    identities: Mutex<Vec<Identity>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> StoreResult<Option<Identity>> {
        let identities = self.identities.lock().await;
        Ok(identities
            .iter()
            .find(|i| i.email == email || i.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Identity>> {
        let identities = self.identities.lock().await;
        Ok(identities.iter().find(|i| i.email == email).cloned())
    }

    async fn find_view_by_id(&self, id: Uuid) -> StoreResult<Option<IdentityView>> {
        let identities = self.identities.lock().await;
        Ok(identities.iter().find(|i| i.id == id).map(Identity::view))
    }

    async fn count_admins(&self) -> StoreResult<i64> {
        let identities = self.identities.lock().await;
        Ok(identities.iter().filter(|i| i.is_admin).count() as i64)
    }

    async fn insert(&self, identity: NewIdentity, admin_limit: i64) -> StoreResult<Identity> {
        let mut identities = self.identities.lock().await;

        if identities
            .iter()
            .any(|i| i.email == identity.email || i.username == identity.username)
        {
            return Err(StoreError::Duplicate);
        }
        if identity.is_admin
            && identities.iter().filter(|i| i.is_admin).count() as i64 >= admin_limit
        {
            return Err(StoreError::AdminQuotaExceeded);
        }

        let now = Utc::now();
        let created = Identity {
            id: Uuid::new_v4(),
            username: identity.username,
            email: identity.email,
            password_hash: identity.password_hash,
            is_admin: identity.is_admin,
            created_at: now,
            updated_at: now,
        };
        identities.push(created.clone());
        Ok(created)
    }
}
