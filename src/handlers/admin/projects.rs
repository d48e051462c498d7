use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::read_multipart;
use crate::error::ApiError;
use crate::state::AppState;
use crate::store::Document;

const TEXT_FIELDS: &[&str] = &["title", "type", "description", "overview", "link"];

/// Pick the project fields out of the raw multipart text parts. `featured`
/// arrives as the string "true"/"false" and becomes a boolean; an absent
/// part means false, on update as well as create.
fn project_fields(raw: &Document) -> Document {
    let mut fields = Document::new();
    for &key in TEXT_FIELDS {
        if let Some(value) = raw.get(key) {
            fields.insert(key.to_string(), value.clone());
        }
    }
    let featured = raw.get("featured").and_then(Value::as_str) == Some("true");
    fields.insert("featured".to_string(), Value::Bool(featured));
    fields
}

/// POST /api/admin/projects - Create a project (image required)
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (raw, upload) = read_multipart(multipart, "image").await?;
    let project = state.project_manager().create(project_fields(&raw), upload).await?;
    Ok(Json(Value::Object(project)))
}

/// PUT /api/admin/projects/:id - Update a project (image optional)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (raw, upload) = read_multipart(multipart, "image").await?;
    let project = state.project_manager().update(&id, project_fields(&raw), upload).await?;
    Ok(Json(Value::Object(project)))
}

/// DELETE /api/admin/projects/:id - Delete a project and its image
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.project_manager().remove(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
