use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRecordStore;
pub use postgres::PostgresRecordStore;

/// A schemaless record: a JSON object with a store-assigned `id` field.
pub type Document = Map<String, Value>;

/// Errors surfaced by the record store. Never retried by callers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Document store collaborator. Filters are JSON objects matched by field
/// equality; the empty filter matches any document in the collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Document>, StoreError>;

    async fn find_many(&self, collection: &str, filter: &Value) -> Result<Vec<Document>, StoreError>;

    /// Insert a document, assigning its `id`. Returns the stored document.
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// Shallow-merge `patch` onto the document with the given id.
    /// Returns the updated document, or None if the id does not resolve.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns true if a document was deleted.
    async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, StoreError>;

    /// Atomic create-or-update: merge `patch` onto the first document matching
    /// `filter`, inserting a fresh one if nothing matches. A concurrent upsert
    /// against the same filter must not produce a second document.
    async fn upsert_one(
        &self,
        collection: &str,
        filter: &Value,
        patch: Document,
    ) -> Result<Document, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Field-equality filter match. Empty filters match everything.
pub fn matches_filter(doc: &Document, filter: &Value) -> bool {
    match filter {
        Value::Object(map) => map.iter().all(|(k, v)| doc.get(k) == Some(v)),
        Value::Null => true,
        _ => false,
    }
}

/// Shallow merge of patch fields onto a document. The store-assigned `id`
/// cannot be patched.
pub fn apply_patch(doc: &mut Document, patch: Document) {
    for (k, v) in patch {
        if k == "id" {
            continue;
        }
        doc.insert(k, v);
    }
}
