use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use super::ManagerError;
use crate::assets::{AssetStore, AssetUpload};
use crate::store::{Document, RecordStore};

/// Enforces exactly-one-live-document semantics for resources without a
/// natural key (profile, CV). The singleton is created lazily on first write
/// and never deleted; reads always hit the store, never a cached copy.
pub struct SingletonManager {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    collection: &'static str,
    folder: &'static str,
}

impl SingletonManager {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<dyn AssetStore>,
        collection: &'static str,
        folder: &'static str,
    ) -> Self {
        Self { records, assets, collection, folder }
    }

    /// Current state of the singleton, or None if it was never written.
    pub async fn get(&self) -> Result<Option<Document>, ManagerError> {
        Ok(self.records.find_one(self.collection, &json!({})).await?)
    }

    /// Apply `patch` to the singleton, creating it if absent. The store's
    /// upsert is atomic, so a concurrent put cannot produce a second row.
    /// Field-level validation is the caller's responsibility.
    pub async fn put(&self, patch: Document) -> Result<Document, ManagerError> {
        Ok(self.records.upsert_one(self.collection, &json!({}), patch).await?)
    }

    /// Replace the singleton's stored file (the CV flow): store the new file,
    /// delete the previously referenced asset, then upsert `url`/`public_id`.
    ///
    /// A failed delete of the old asset is logged and tolerated; an orphaned
    /// file is recoverable, a lost CV record is not. A failed store of the new
    /// file is fatal - the record must never point at an asset that was not
    /// written.
    pub async fn replace_file(&self, upload: AssetUpload) -> Result<Document, ManagerError> {
        let stored = self.assets.store(upload, self.folder).await?;

        if let Some(current) = self.get().await? {
            if let Some(old_id) = current.get("public_id").and_then(Value::as_str) {
                if let Err(e) = self.assets.delete(old_id).await {
                    tracing::warn!(
                        collection = self.collection,
                        asset_id = old_id,
                        "failed to delete superseded asset: {}",
                        e
                    );
                }
            }
        }

        let mut patch = Document::new();
        patch.insert("url".to_string(), Value::String(stored.url));
        patch.insert("public_id".to_string(), Value::String(stored.asset_id));
        patch.insert("updatedAt".to_string(), Value::String(Utc::now().to_rfc3339()));

        self.put(patch).await
    }
}
