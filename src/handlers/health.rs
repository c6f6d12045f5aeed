use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

const WELCOME: &str = "Welcome to the Artonus POS API!";

#[derive(Debug, Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}

/// Liveness/welcome handler
///
/// GET /
pub async fn welcome_handler() -> impl IntoResponse {
    (StatusCode::OK, WELCOME)
}

/// Health check handler
///
/// GET /health
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: chrono::Utc::now().timestamp(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_welcome_handler() {
        let response = welcome_handler().await.into_response();

        assert_eq!(response.status(), StatusCode::OK);

        use http_body_util::BodyExt;
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], WELCOME.as_bytes());
    }

    #[tokio::test]
    async fn test_health_response_has_timestamp() {
        use http_body_util::BodyExt;

        let response = health_handler().await.into_response();

        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, StatusCode::OK);

        let bytes = body.collect().await.unwrap().to_bytes();
        let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(health.status, "ok");
        assert!(health.timestamp > 0);
    }
}
