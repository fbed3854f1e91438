use super::json_response;
use axum::{http::StatusCode, response::Response};
use chrono::Utc;
use serde_json::json;

/// Liveness probe: `{"status":"ok","ts":<epoch-millis>}`.
pub async fn health_check() -> Response {
    json_response(
        StatusCode::OK,
        json!({
            "status": "ok",
            "ts": Utc::now().timestamp_millis(),
        }),
    )
}
