//! PostgreSQL document store
//!
//! All collections share the `documents` table:
//!
//! ```sql
//! documents (id UUID, collection TEXT, body JSONB, created_at, updated_at)
//! ```
//!
//! Uniqueness of a field is enforced twice: the insert only writes when no
//! matching document exists, and a partial unique index (see migrations)
//! catches concurrent inserts that both passed that check.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult, StoredDocument};

/// PostgreSQL-backed [`DocumentStore`]
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        body: Value,
        unique_field: Option<&str>,
    ) -> StoreResult<StoredDocument> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let unique = unique_field.and_then(|field| {
            body.get(field)
                .and_then(Value::as_str)
                .map(|value| (field, value.to_owned()))
        });

        let inserted = match unique {
            Some((field, value)) => sqlx::query_as::<_, StoredDocument>(
                r#"
                INSERT INTO documents (id, collection, body, created_at, updated_at)
                SELECT $1, $2, $3, $4, $4
                WHERE NOT EXISTS (
                    SELECT 1 FROM documents WHERE collection = $2 AND body ->> $5 = $6
                )
                RETURNING id, body, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(collection)
            .bind(&body)
            .bind(now)
            .bind(field)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_insert)?,
            None => sqlx::query_as::<_, StoredDocument>(
                r#"
                INSERT INTO documents (id, collection, body, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $4)
                RETURNING id, body, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(collection)
            .bind(&body)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::from_insert)?,
        };

        inserted.ok_or(StoreError::Duplicate)
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let docs = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<StoredDocument>> {
        let doc = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND id = $2
            "#,
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc)
    }

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<StoredDocument>> {
        let doc = sqlx::query_as::<_, StoredDocument>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1 AND body ->> $2 = $3
            LIMIT 1
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc)
    }

    async fn merge(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<StoredDocument>> {
        let doc = sqlx::query_as::<_, StoredDocument>(
            r#"
            UPDATE documents
            SET body = body || $3, updated_at = $4
            WHERE collection = $1 AND id = $2
            RETURNING id, body, created_at, updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(patch))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::from_insert)?;

        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: &str) -> StoreResult<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
