use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{apply_patch, matches_filter, Document, RecordStore, StoreError};

/// In-memory record store. Backs tests and local development; documents are
/// kept in insertion order per collection.
#[derive(Default)]
pub struct MemoryRecordStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches_filter(d, filter)).cloned()))
    }

    async fn find_many(&self, collection: &str, filter: &Value) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches_filter(d, filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        doc.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        for doc in docs.iter_mut() {
            if doc.get("id").and_then(Value::as_str) == Some(id) {
                apply_patch(doc, patch);
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.get("id").and_then(Value::as_str) != Some(id));
        Ok(docs.len() < before)
    }

    async fn upsert_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Document,
    ) -> Result<Document, StoreError> {
        // Single write lock for the whole read-modify-write, so two concurrent
        // upserts against the same filter cannot both take the insert path.
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(doc) = docs.iter_mut().find(|d| matches_filter(d, filter)) {
            apply_patch(doc, patch);
            return Ok(doc.clone());
        }

        let mut doc = patch;
        doc.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
