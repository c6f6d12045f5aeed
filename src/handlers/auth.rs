use crate::auth::password::{hash_password, verify_password};
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::models::api::{LoginRequest, RegisterRequest, SuccessResponse, TokenResponse};
use crate::models::user::{User, ROLE_EMPLOYEE};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Register a new user
///
/// POST /register  body: {username, password, role?}
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    if body.username.trim().is_empty() {
        return Err(ApiError::Validation("username is required".to_string()));
    }

    if body.password.is_empty() {
        return Err(ApiError::Validation("password is required".to_string()));
    }

    // Open role set; anything absent or blank falls back to employee
    let role = body
        .role
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| ROLE_EMPLOYEE.to_string());

    let password_hash =
        hash_password(&body.password).map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

    let user = state
        .users
        .insert(User::new(body.username, password_hash, role))
        .map_err(|_| ApiError::UsernameTaken)?;

    info!(
        user_id = %user.id,
        username = %user.username,
        role = %user.role,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            message: "User registered successfully".to_string(),
        }),
    )
        .into_response())
}

/// Log in and receive a bearer token
///
/// POST /login  body: {username, password}
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = state.users.find_by_username(&body.username).ok_or_else(|| {
        warn!(username = %body.username, "Login attempt for unknown user");
        ApiError::UserNotFound
    })?;

    let matches = verify_password(&body.password, &user.password_hash)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

    if !matches {
        warn!(username = %body.username, "Login attempt with incorrect password");
        return Err(ApiError::IncorrectPassword);
    }

    let token = state
        .tokens
        .issue(&user.id.to_string(), &user.role)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok((StatusCode::OK, Json(TokenResponse { token })).into_response())
}
