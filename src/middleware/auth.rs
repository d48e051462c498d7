use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{Json, Response},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde_json::Value;

use crate::auth::Claims;
use crate::config;
use crate::error::ApiError;

/// Authenticated admin context extracted from the bearer token. The resource
/// managers themselves never see credentials; this gate is the only place
/// tokens are checked.
#[derive(Clone, Debug)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
}

impl From<Claims> for AdminUser {
    fn from(claims: Claims) -> Self {
        Self { username: claims.sub, role: claims.role }
    }
}

fn unauthorized_response(msg: String) -> (StatusCode, Json<Value>) {
    let api_error = ApiError::unauthorized(msg);
    (
        StatusCode::from_u16(api_error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED),
        Json(api_error.to_json()),
    )
}

/// Bearer-token middleware guarding all admin write routes.
pub async fn admin_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let token = extract_bearer_token(&headers).map_err(unauthorized_response)?;
    let claims = validate_token(&token).map_err(unauthorized_response)?;

    let admin = AdminUser::from(claims);
    request.extensions_mut().insert(admin);

    Ok(next.run(request).await)
}

/// Extract the token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

/// Validate the token and extract claims
fn validate_token(token: &str) -> Result<Claims, String> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err("JWT secret not configured".to_string());
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Invalid bearer token: {}", e))?;

    Ok(token_data.claims)
}
