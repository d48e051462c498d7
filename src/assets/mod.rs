use async_trait::async_trait;

pub mod local;

pub use local::LocalAssetStore;

/// A binary payload received from a multipart upload.
#[derive(Debug, Clone)]
pub struct AssetUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: Option<String>,
}

/// Location of a stored asset: a public URL plus the opaque id used to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub url: String,
    pub asset_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AssetStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid asset id: {0}")]
    InvalidId(String),
}

/// Binary-object store collaborator. `delete` is idempotent: removing an id
/// that no longer exists is not an error.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, upload: AssetUpload, folder: &str) -> Result<StoredAsset, AssetStoreError>;

    async fn delete(&self, asset_id: &str) -> Result<(), AssetStoreError>;
}
