use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::Value;

use super::utils::read_multipart;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/admin/cv - Replace the CV file. The singleton manager deletes the
/// superseded file as part of the swap.
pub async fn upload_cv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let (_, upload) = read_multipart(multipart, "cv").await?;
    let upload = upload.ok_or_else(|| ApiError::bad_request("No CV file uploaded"))?;

    let cv = state.cv_manager().replace_file(upload).await?;
    Ok(Json(Value::Object(cv)))
}

/// GET /api/admin/cv - Current CV record, or null if none was ever uploaded.
pub async fn get_cv(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let cv = state.cv_manager().get().await?;
    Ok(Json(cv.map(Value::Object).unwrap_or(Value::Null)))
}
