use axum::Json;

use crate::auth::{generate_jwt, verify_admin_credentials, Claims};
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};

/// POST /api/auth/login - Authenticate the admin and issue a bearer token
pub async fn login(Json(body): Json<LoginRequest>) -> Result<Json<LoginResponse>, ApiError> {
    if !verify_admin_credentials(&body.username, &body.password) {
        return Err(ApiError::bad_request("Invalid Credentials"));
    }

    let token = generate_jwt(Claims::admin(body.username)).map_err(|e| {
        tracing::error!("token generation failed: {}", e);
        ApiError::internal_server_error("Failed to issue token")
    })?;

    Ok(Json(LoginResponse { token }))
}
