use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{require_fields, ManagerError};
use crate::assets::{AssetStore, AssetUpload};
use crate::store::{Document, RecordStore};

/// Manages records whose primary content is an uploaded image (projects, case
/// studies). Invariant: `imageUrl` and `imagePublicId` always refer to the
/// same stored asset; a record is never updated to point at a file that was
/// not durably written.
pub struct AssetRecordManager {
    records: Arc<dyn RecordStore>,
    assets: Arc<dyn AssetStore>,
    collection: &'static str,
    folder: &'static str,
    required_fields: &'static [&'static str],
}

impl AssetRecordManager {
    pub fn new(
        records: Arc<dyn RecordStore>,
        assets: Arc<dyn AssetStore>,
        collection: &'static str,
        folder: &'static str,
        required_fields: &'static [&'static str],
    ) -> Self {
        Self { records, assets, collection, folder, required_fields }
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Document>, ManagerError> {
        Ok(self.records.find_one(self.collection, &json!({ "id": id })).await?)
    }

    /// Delete a superseded or orphaned asset, tolerating failure. The record
    /// side of the operation has already committed by the time this runs.
    async fn delete_old_asset(&self, asset_id: &str) {
        if let Err(e) = self.assets.delete(asset_id).await {
            tracing::warn!(
                collection = self.collection,
                asset_id,
                "failed to delete superseded asset: {}",
                e
            );
        }
    }

    /// Create a record. The image is mandatory; validation rejects before any
    /// store or asset call.
    pub async fn create(
        &self,
        mut fields: Document,
        asset: Option<AssetUpload>,
    ) -> Result<Document, ManagerError> {
        require_fields(&fields, self.required_fields)?;
        let upload = asset.ok_or_else(|| {
            ManagerError::Validation(format!("No image uploaded for {}", self.collection))
        })?;

        let stored = self.assets.store(upload, self.folder).await?;
        fields.insert("imageUrl".to_string(), Value::String(stored.url));
        fields.insert("imagePublicId".to_string(), Value::String(stored.asset_id));
        fields.insert("createdAt".to_string(), Value::String(Utc::now().to_rfc3339()));

        Ok(self.records.insert(self.collection, fields).await?)
    }

    /// Update a record, optionally replacing its image. With a new image the
    /// sequence is store-new, commit-record, delete-old: if the record update
    /// fails the old asset survives (a recoverable orphan) instead of the
    /// record pointing at a deleted file.
    pub async fn update(
        &self,
        id: &str,
        mut fields: Document,
        asset: Option<AssetUpload>,
    ) -> Result<Document, ManagerError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ManagerError::NotFound(format!("{} {} not found", self.collection, id)))?;

        let Some(upload) = asset else {
            // No new image: field updates only, asset fields untouched.
            return self
                .records
                .update_by_id(self.collection, id, fields)
                .await?
                .ok_or_else(|| {
                    ManagerError::NotFound(format!("{} {} not found", self.collection, id))
                });
        };

        let old_asset_id = existing
            .get("imagePublicId")
            .and_then(Value::as_str)
            .map(str::to_string);

        let stored = self.assets.store(upload, self.folder).await?;
        fields.insert("imageUrl".to_string(), Value::String(stored.url));
        fields.insert("imagePublicId".to_string(), Value::String(stored.asset_id));

        let updated = self
            .records
            .update_by_id(self.collection, id, fields)
            .await?
            .ok_or_else(|| ManagerError::NotFound(format!("{} {} not found", self.collection, id)))?;

        if let Some(old_id) = old_asset_id {
            self.delete_old_asset(&old_id).await;
        }

        Ok(updated)
    }

    /// Delete a record and its asset. The asset goes first but its failure is
    /// tolerated; a missing id fails before any asset-store call.
    pub async fn remove(&self, id: &str) -> Result<(), ManagerError> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| ManagerError::NotFound(format!("{} {} not found", self.collection, id)))?;

        if let Some(asset_id) = existing.get("imagePublicId").and_then(Value::as_str) {
            self.delete_old_asset(asset_id).await;
        }

        self.records.delete_by_id(self.collection, id).await?;
        Ok(())
    }
}
