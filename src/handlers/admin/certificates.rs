use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::require_object;
use crate::error::ApiError;
use crate::state::{collections, AppState};

/// POST /api/admin/certificates - Add a certificate or internship entry
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let doc = require_object(body)?;
    let cert = state.records.insert(collections::CERTIFICATES, doc).await?;
    Ok(Json(Value::Object(cert)))
}

/// PUT /api/admin/certificates/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = require_object(body)?;
    let cert = state
        .records
        .update_by_id(collections::CERTIFICATES, &id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Certificate {} not found", id)))?;
    Ok(Json(Value::Object(cert)))
}

/// DELETE /api/admin/certificates/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.records.delete_by_id(collections::CERTIFICATES, &id).await? {
        return Err(ApiError::not_found(format!("Certificate {} not found", id)));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
