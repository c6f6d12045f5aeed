use crate::core::error::ApiError;
use crate::core::state::AppState;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::debug;

/// Gate for protected routes
///
/// Verifies the `Authorization: Bearer <token>` header and attaches an
/// `AuthContext` to the request extensions for the downstream handler.
/// Pure gate: never touches the stores.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(ApiError::MissingToken)?
        .to_str()
        .map_err(|_| ApiError::MalformedAuthHeader)?;

    let token = match header.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() => token,
        _ => return Err(ApiError::MalformedAuthHeader),
    };

    let ctx = state.tokens.verify(token).map_err(|e| {
        debug!(error = %e, "Token verification failed");
        ApiError::InvalidToken
    })?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
