use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

use super::{AssetStore, AssetStoreError, AssetUpload, StoredAsset};

/// Disk-backed asset store. Files land under the configured uploads directory
/// and are served statically; the asset id is the path relative to that root.
pub struct LocalAssetStore {
    root: PathBuf,
    public_prefix: String,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        let mut public_prefix = public_prefix.into();
        while public_prefix.ends_with('/') {
            public_prefix.pop();
        }
        Self { root: root.into(), public_prefix }
    }

    /// File extension from the uploaded name, lowercased. Unknown names get no
    /// extension rather than inheriting arbitrary client input.
    fn extension(file_name: &str) -> Option<String> {
        let ext = Path::new(file_name).extension()?.to_str()?;
        if ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            Some(ext.to_ascii_lowercase())
        } else {
            None
        }
    }

    fn checked_path(&self, asset_id: &str) -> Result<PathBuf, AssetStoreError> {
        let relative = Path::new(asset_id);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(AssetStoreError::InvalidId(asset_id.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn store(&self, upload: AssetUpload, folder: &str) -> Result<StoredAsset, AssetStoreError> {
        let name = match Self::extension(&upload.file_name) {
            Some(ext) => format!("{}.{}", Uuid::new_v4().simple(), ext),
            None => Uuid::new_v4().simple().to_string(),
        };

        let asset_id = format!("{}/{}", folder, name);
        let path = self.checked_path(&asset_id)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &upload.bytes).await?;

        Ok(StoredAsset {
            url: format!("{}/{}", self.public_prefix, asset_id),
            asset_id,
        })
    }

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError> {
        let path = self.checked_path(asset_id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // Deleting a missing asset is not an error
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(LocalAssetStore::extension("photo.PNG"), Some("png".to_string()));
        assert_eq!(LocalAssetStore::extension("cv.pdf"), Some("pdf".to_string()));
        assert_eq!(LocalAssetStore::extension("no_extension"), None);
        assert_eq!(LocalAssetStore::extension("weird.ext!ension?"), None);
    }

    #[test]
    fn traversal_ids_are_rejected() {
        let store = LocalAssetStore::new("uploads", "/uploads");
        assert!(store.checked_path("../etc/passwd").is_err());
        assert!(store.checked_path("").is_err());
        assert!(store.checked_path("portfolio_uploads/a.png").is_ok());
    }
}
