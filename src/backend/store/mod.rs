//! Document Store
//!
//! Content, subscribers and contact submissions are schemaless JSON documents
//! grouped into named collections. Two backends implement [`DocumentStore`]:
//!
//! - **`postgres`** - one `documents` table with a JSONB body (production)
//! - **`memory`** - a map behind a lock (tests, or no `DATABASE_URL`)
//!
//! Handlers never see raw JSON bodies; they go through the typed
//! [`Collection`] wrapper, which (de)serializes [`Record`]s.
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs        - DocumentStore trait, StoreError, Collection<T>
//! ├── postgres.rs   - PgDocumentStore
//! └── memory.rs     - MemoryDocumentStore
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::content::{Document, Record};

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// Errors raised by the document and credential stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field already holds the submitted value
    #[error("duplicate value for a unique field")]
    Duplicate,

    /// The admin cap was reached while inserting an admin identity
    #[error("admin account limit reached")]
    AdminQuotaExceeded,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored body no longer matches its document type
    #[error("stored document could not be decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Map an insert failure, turning unique violations into [`StoreError::Duplicate`]
    pub fn from_insert(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::Duplicate,
            _ => Self::Database(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A raw stored document
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Decode the body into a typed record
    pub fn into_record<T: Document>(self) -> Result<Record<T>, serde_json::Error> {
        Ok(Record {
            id: self.id,
            document: serde_json::from_value(self.body)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Storage for JSON documents grouped by collection
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document. When `unique_field` is set, fails with
    /// [`StoreError::Duplicate`] if another document in the collection has
    /// the same value for it.
    async fn insert(
        &self,
        collection: &str,
        body: Value,
        unique_field: Option<&str>,
    ) -> StoreResult<StoredDocument>;

    /// Every document in a collection, newest first
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<StoredDocument>>;

    /// First document whose top-level string `field` equals `value`
    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<StoredDocument>>;

    /// Shallow-merge `patch` into a document's body and bump `updated_at`
    async fn merge(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<StoredDocument>>;

    /// Returns whether a document was removed
    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool>;

    async fn count(&self, collection: &str) -> StoreResult<i64>;
}

/// Typed view of one collection
pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _document: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _document: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _document: PhantomData,
        }
    }

    pub async fn insert(&self, document: &T) -> StoreResult<Record<T>> {
        let body = serde_json::to_value(document)?;
        let stored = self.store.insert(T::COLLECTION, body, T::UNIQUE_FIELD).await?;
        Ok(stored.into_record()?)
    }

    /// All records in the document type's list order
    pub async fn list(&self) -> StoreResult<Vec<Record<T>>> {
        let mut records = self
            .store
            .find_all(T::COLLECTION)
            .await?
            .into_iter()
            .map(StoredDocument::into_record)
            .collect::<Result<Vec<Record<T>>, _>>()?;
        records.sort_by(T::compare);
        Ok(records)
    }

    pub async fn get(&self, id: Uuid) -> StoreResult<Option<Record<T>>> {
        match self.store.find_by_id(T::COLLECTION, id).await? {
            Some(stored) => Ok(Some(stored.into_record()?)),
            None => Ok(None),
        }
    }

    pub async fn find_by(&self, field: &str, value: &str) -> StoreResult<Option<Record<T>>> {
        match self.store.find_one_by_field(T::COLLECTION, field, value).await? {
            Some(stored) => Ok(Some(stored.into_record()?)),
            None => Ok(None),
        }
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Record<T>>> {
        match self.store.merge(T::COLLECTION, id, patch).await? {
            Some(stored) => Ok(Some(stored.into_record()?)),
            None => Ok(None),
        }
    }

    pub async fn remove(&self, id: Uuid) -> StoreResult<bool> {
        self.store.delete(T::COLLECTION, id).await
    }

    pub async fn count(&self) -> StoreResult<i64> {
        self.store.count(T::COLLECTION).await
    }
}
