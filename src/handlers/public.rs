use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::{collections, AppState};
use crate::store::Document;

/// GET /api/public/profile - The public profile, or an empty object if the
/// singleton was never written.
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let profile = state.profile_manager().get().await?;
    Ok(Json(profile.map(Value::Object).unwrap_or_else(|| json!({}))))
}

/// GET /api/public/all - The whole portfolio in one payload for initial page
/// load: profile, enabled socials, ticker techs, projects, certificates,
/// testimonials, CV, case studies, and experiences newest-first.
pub async fn get_all(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let records = &state.records;

    let profile = state.profile_manager().get().await?;
    let socials = records.find_many(collections::SOCIALS, &json!({"enabled": true})).await?;
    let techs = records.find_many(collections::TECHS, &json!({"inTicker": true})).await?;
    let projects = records.find_many(collections::PROJECTS, &json!({})).await?;
    let certificates = records.find_many(collections::CERTIFICATES, &json!({})).await?;
    let testimonials = records.find_many(collections::TESTIMONIALS, &json!({})).await?;
    let cv = state.cv_manager().get().await?;
    let case_studies = records.find_many(collections::CASE_STUDIES, &json!({})).await?;
    let mut experiences = records.find_many(collections::EXPERIENCES, &json!({})).await?;
    sort_newest_first(&mut experiences);

    Ok(Json(json!({
        "profile": profile.map(Value::Object).unwrap_or_else(|| json!({})),
        "socials": socials,
        "techs": techs,
        "projects": projects,
        "certificates": certificates,
        "testimonials": testimonials,
        "cv": cv.map(Value::Object).unwrap_or(Value::Null),
        "caseStudies": case_studies,
        "experiences": experiences,
    })))
}

/// Newest first by `createdAt`; RFC 3339 timestamps sort lexicographically.
pub(crate) fn sort_newest_first(docs: &mut [Document]) {
    docs.sort_by(|a, b| {
        let a = a.get("createdAt").and_then(Value::as_str).unwrap_or("");
        let b = b.get("createdAt").and_then(Value::as_str).unwrap_or("");
        b.cmp(a)
    });
}
