use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::{require_object, word_count};
use crate::error::ApiError;
use crate::state::{collections, AppState};
use crate::store::Document;

const QUOTE_WORD_LIMIT: usize = 30;

fn check_quote_limit(doc: &Document) -> Result<(), ApiError> {
    if let Some(text) = doc.get("text").and_then(Value::as_str) {
        if word_count(text.trim()) > QUOTE_WORD_LIMIT {
            return Err(ApiError::bad_request(format!(
                "Quote exceeds {} words limit",
                QUOTE_WORD_LIMIT
            )));
        }
    }
    Ok(())
}

/// POST /api/admin/testimonials - Add a testimonial (quote capped at 30 words)
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let doc = require_object(body)?;
    check_quote_limit(&doc)?;
    let testimonial = state.records.insert(collections::TESTIMONIALS, doc).await?;
    Ok(Json(Value::Object(testimonial)))
}

/// PUT /api/admin/testimonials/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let patch = require_object(body)?;
    check_quote_limit(&patch)?;
    let testimonial = state
        .records
        .update_by_id(collections::TESTIMONIALS, &id, patch)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Testimonial {} not found", id)))?;
    Ok(Json(Value::Object(testimonial)))
}

/// DELETE /api/admin/testimonials/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    if !state.records.delete_by_id(collections::TESTIMONIALS, &id).await? {
        return Err(ApiError::not_found(format!("Testimonial {} not found", id)));
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
