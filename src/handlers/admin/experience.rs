use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::public::sort_newest_first;
use crate::models::ExperienceInput;
use crate::state::{collections, AppState};

/// GET /api/admin/experience - All experience entries, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let mut experiences = state.records.find_many(collections::EXPERIENCES, &json!({})).await?;
    sort_newest_first(&mut experiences);
    Ok(Json(json!(experiences)))
}

/// POST /api/admin/experience
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ExperienceInput>,
) -> Result<Json<Value>, ApiError> {
    let mut fields = body.into_fields();
    fields.insert("createdAt".to_string(), Value::String(Utc::now().to_rfc3339()));
    let experience = state.records.insert(collections::EXPERIENCES, fields).await?;
    Ok(Json(Value::Object(experience)))
}

/// PUT /api/admin/experience/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ExperienceInput>,
) -> Result<Json<Value>, ApiError> {
    let experience = state
        .records
        .update_by_id(collections::EXPERIENCES, &id, body.into_fields())
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Experience {} not found", id)))?;
    Ok(Json(Value::Object(experience)))
}

/// DELETE /api/admin/experience/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.records.delete_by_id(collections::EXPERIENCES, &id).await? {
        return Err(ApiError::not_found(format!("Experience {} not found", id)));
    }
    Ok(Json(json!({ "message": "Experience deleted" })))
}
