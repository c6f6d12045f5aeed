use crate::core::error::ApiError;
use axum::response::{IntoResponse, Response};

/// JSON 404 for all unmatched routes
pub async fn fallback_handler() -> Response {
    ApiError::RouteNotFound.into_response()
}
