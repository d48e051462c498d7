use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::{read_multipart, require_object};
use crate::error::ApiError;
use crate::state::{AppState, UPLOAD_FOLDER};
use crate::store::Document;

/// PUT /api/admin/profile - Upsert the profile singleton with a JSON patch.
pub async fn update_profile(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = require_object(body)?;
    let profile = state.profile_manager().put(patch).await?;
    Ok(Json(Value::Object(profile)))
}

/// POST /api/admin/upload-profile-image - Store a new profile photo and point
/// the profile singleton at it.
pub async fn upload_profile_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (_, upload) = read_multipart(multipart, "image").await?;
    let upload = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    let stored = state.assets.store(upload, UPLOAD_FOLDER).await?;

    let mut patch = Document::new();
    patch.insert("profilePhotoUrl".to_string(), Value::String(stored.url.clone()));
    let profile = state.profile_manager().put(patch).await?;

    Ok(Json(json!({ "imageUrl": stored.url, "profile": profile })))
}
