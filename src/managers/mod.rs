use serde_json::Value;

use crate::assets::AssetStoreError;
use crate::store::{Document, StoreError};

pub mod asset_record;
pub mod singleton;

pub use asset_record::AssetRecordManager;
pub use singleton::SingletonManager;

/// Failures from the resource managers. Managers never retry; the route layer
/// decides the user-visible response.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("asset store error: {0}")]
    AssetStore(#[from] AssetStoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reject before any store or asset call when a mandatory text field is
/// missing, null, or blank.
pub(crate) fn require_fields(doc: &Document, fields: &[&str]) -> Result<(), ManagerError> {
    for &field in fields {
        let present = match doc.get(field) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        };
        if !present {
            return Err(ManagerError::Validation(format!("Missing required field: {}", field)));
        }
    }
    Ok(())
}

/// Split a comma-separated text field into a trimmed ordered list.
/// Empty or whitespace-only input yields an empty list, never null.
pub fn parse_methods(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
