// Centralized error handling for the booking API

use crate::models::api::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers, each mapped to an HTTP status and
/// a JSON error body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("username already taken")]
    UsernameTaken,

    #[error("user not found")]
    UserNotFound,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("missing authorization header")]
    MissingToken,

    #[error("malformed authorization header, expected 'Bearer <token>'")]
    MalformedAuthHeader,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("access denied")]
    Forbidden,

    #[error("route not found")]
    RouteNotFound,

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Dependency failures are logged in full but never leaked
        if let ApiError::Internal(err) = &self {
            error!(error = %err, "Request failed with internal error");
        }

        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UsernameTaken => StatusCode::CONFLICT,
            ApiError::UserNotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::IncorrectPassword
            | ApiError::MissingToken
            | ApiError::MalformedAuthHeader
            | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
