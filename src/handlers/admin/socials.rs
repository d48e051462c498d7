use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::require_object;
use crate::error::ApiError;
use crate::models::SocialUpsert;
use crate::state::{collections, AppState};

/// POST /api/admin/socials/upsert - Create or update a link keyed by platform
pub async fn upsert(
    State(state): State<AppState>,
    Json(body): Json<SocialUpsert>,
) -> Result<Json<Value>, ApiError> {
    let filter = json!({ "platform": body.platform.clone() });
    let social = state
        .records
        .upsert_one(collections::SOCIALS, &filter, body.into_patch())
        .await?;
    Ok(Json(Value::Object(social)))
}

/// PUT /api/admin/socials/:id - Update a link by id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = require_object(body)?;
    let social = state
        .records
        .update_by_id(collections::SOCIALS, &id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Social link {} not found", id)))?;
    Ok(Json(Value::Object(social)))
}

/// DELETE /api/admin/socials/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.records.delete_by_id(collections::SOCIALS, &id).await? {
        return Err(ApiError::not_found(format!("Social link {} not found", id)));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
