pub mod health;
pub mod log;

use crate::server::LogState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use moblog_core::error::MoblogError;
use serde_json::Value;
use std::sync::Arc;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Route a log-server request by method and path prefix.
pub async fn dispatch(State(state): State<Arc<LogState>>, request: Request) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    if method == Method::POST && path.starts_with("/log") {
        return log::ingest_logs(state, request).await;
    }
    if method == Method::GET && path.starts_with("/health") {
        return health::health_check().await;
    }
    error_response(&MoblogError::NotFound)
}

/// Compact JSON body with the `application/json; charset=utf-8` content type.
pub fn json_response(status: StatusCode, body: Value) -> Response {
    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body.to_string()).into_response()
}

pub fn error_response(err: &MoblogError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, err.to_json_body())
}
