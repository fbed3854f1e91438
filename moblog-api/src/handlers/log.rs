use super::{error_response, json_response};
use crate::ingest;
use crate::server::LogState;
use axum::{
    body::Bytes,
    extract::{ConnectInfo, FromRequest, Request},
    http::StatusCode,
    response::Response,
};
use moblog_core::error::MoblogError;
use moblog_core::event::{LogBatch, ReceiptStamp};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// `POST /log*`: accept one event object or an array of them.
///
/// Responds `{"ok":true,"n":<accepted>}` once the batch validates; a failed
/// append is logged and does not change the response.
#[instrument(name = "handlers.log", skip_all)]
pub async fn ingest_logs(state: Arc<LogState>, request: Request) -> Response {
    let client_ip = client_ip(&request);

    let body = match Bytes::from_request(request, &()).await {
        Ok(body) => body,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error_response(&MoblogError::PayloadTooLarge);
        }
        Err(rejection) => {
            debug!(error = %rejection, "Failed to read request body");
            return error_response(&MoblogError::InvalidJson);
        }
    };

    let batch = match LogBatch::parse(&body) {
        Ok(batch) => batch,
        Err(err) => return error_response(&err),
    };

    let events = batch.stamp(&ReceiptStamp::now(client_ip));
    let outcome = ingest::ingest(&state, events).await;
    if !outcome.is_durable() {
        warn!(
            accepted = outcome.accepted,
            persisted = outcome.persisted,
            "Batch acknowledged but not persisted"
        );
    }

    json_response(StatusCode::OK, json!({ "ok": true, "n": outcome.accepted }))
}

/// Peer address of the TCP connection; forwarding headers are ignored.
fn client_ip(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_canonical().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
