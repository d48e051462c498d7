use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde_json::{json, Value};

use super::utils::read_multipart;
use crate::error::ApiError;
use crate::managers::parse_methods;
use crate::state::AppState;
use crate::store::Document;

const TEXT_FIELDS: &[&str] = &["title", "description", "overview", "link"];

/// Pick case-study fields out of the raw multipart text parts. `methods` is a
/// comma-separated list and becomes an ordered string array.
fn case_study_fields(raw: &Document) -> Document {
    let mut fields = Document::new();
    for &key in TEXT_FIELDS {
        if let Some(value) = raw.get(key) {
            fields.insert(key.to_string(), value.clone());
        }
    }
    let methods = raw
        .get("methods")
        .and_then(Value::as_str)
        .map(parse_methods)
        .unwrap_or_default();
    fields.insert("methods".to_string(), json!(methods));
    fields
}

/// POST /api/admin/casestudies - Create a case study (image required)
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (raw, upload) = read_multipart(multipart, "image").await?;
    let case_study = state.case_study_manager().create(case_study_fields(&raw), upload).await?;
    Ok(Json(Value::Object(case_study)))
}

/// PUT /api/admin/casestudies/:id - Update a case study (image optional)
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (raw, upload) = read_multipart(multipart, "image").await?;
    let case_study = state
        .case_study_manager()
        .update(&id, case_study_fields(&raw), upload)
        .await?;
    Ok(Json(Value::Object(case_study)))
}

/// DELETE /api/admin/casestudies/:id - Delete a case study and its image
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.case_study_manager().remove(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
