//! In-memory document store
//!
//! Used by the test suite and as a fallback when no database is configured.
//! Everything is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoreError, StoreResult, StoredDocument};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn field_matches(doc: &StoredDocument, field: &str, value: &str) -> bool {
    doc.body.get(field).and_then(Value::as_str) == Some(value)
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        body: Value,
        unique_field: Option<&str>,
    ) -> StoreResult<StoredDocument> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(field) = unique_field {
            if let Some(value) = body.get(field).and_then(Value::as_str) {
                if docs.iter().any(|doc| field_matches(doc, field, value)) {
                    return Err(StoreError::Duplicate);
                }
            }
        }

        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            body,
            created_at: now,
            updated_at: now,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn find_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        let mut docs = collections.get(collection).cloned().unwrap_or_default();
        docs.reverse();
        Ok(docs)
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> StoreResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn find_one_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> StoreResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| field_matches(doc, field, value)))
            .cloned())
    }

    async fn merge(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<StoredDocument>> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return Ok(None);
        };

        if let Value::Object(body) = &mut doc.body {
            body.extend(patch);
        }
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: &str, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() != before)
    }

    async fn count(&self, collection: &str) -> StoreResult<i64> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let store = MemoryDocumentStore::new();
        let first = store.insert("notes", json!({"n": 1}), None).await.unwrap();
        let second = store.insert("notes", json!({"n": 2}), None).await.unwrap();

        let ids: Vec<_> = store
            .find_all("notes")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let store = MemoryDocumentStore::new();
        let keep = store.insert("notes", json!({"n": 1}), None).await.unwrap();
        let gone = store.insert("notes", json!({"n": 2}), None).await.unwrap();

        assert!(store.delete("notes", gone.id).await.unwrap());
        assert!(!store.delete("notes", gone.id).await.unwrap());
        assert_eq!(store.count("notes").await.unwrap(), 1);
        assert!(store.find_by_id("notes", keep.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unique_field_is_scoped_to_collection() {
        let store = MemoryDocumentStore::new();
        let body = json!({"email": "a@x.com"});
        store.insert("subscribers", body.clone(), Some("email")).await.unwrap();
        store.insert("contacts", body, Some("email")).await.unwrap();
    }
}
