use crate::{handlers, middleware};
use anyhow::Context;
use axum::{Router, extract::DefaultBodyLimit};
use moblog_core::config::{LogServerConfig, StaticServerConfig};
use moblog_store::JsonlWriter;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, HttpMakeClassifier, TraceLayer,
};
use tracing::{Level, info};

/// Shared state for the log ingestion server.
pub struct LogState {
    pub config: LogServerConfig,
    pub writer: JsonlWriter,
}

impl LogState {
    pub fn new(config: LogServerConfig) -> Self {
        let writer = JsonlWriter::new(config.log_file.clone());
        Self { config, writer }
    }
}

/// Build the log server router.
///
/// Every path goes through [`handlers::dispatch`], which matches on method
/// and path prefix (`POST /log*`, `GET /health*`).
pub fn build_log_router(state: Arc<LogState>) -> Router {
    let body_limit = state.config.max_body_bytes;
    let router = Router::new()
        .fallback(handlers::dispatch)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(middleware::preflight))
        .with_state(state);

    middleware::with_cors_headers(router).layer(request_trace())
}

/// Build the static file router rooted at `config.root`.
pub fn build_static_router(config: &StaticServerConfig) -> Router {
    let router = Router::new()
        .fallback_service(ServeDir::new(&config.root))
        .layer(axum::middleware::from_fn(middleware::preflight));

    middleware::with_cors_headers(router).layer(request_trace())
}

/// Request/response tracing at `info`, so every request shows up at the
/// default log level.
fn request_trace()
-> TraceLayer<HttpMakeClassifier, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Run the log ingestion server until Ctrl+C.
pub async fn serve_logs(config: LogServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    let state = Arc::new(LogState::new(config));
    let app = build_log_router(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr} (port already in use?)"))?;

    let port = addr.port();
    info!(addr = %addr, log_file = %state.writer.path().display(), "Mobile log server running");
    info!("Health:  http://localhost:{port}/health");
    info!("HTTP:    POST http://localhost:{port}/log");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Mobile log server stopped");
    Ok(())
}

/// Run the static file server until Ctrl+C.
pub async fn serve_static(config: StaticServerConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    anyhow::ensure!(
        config.root.is_dir(),
        "static root {} is not a directory",
        config.root.display()
    );
    let app = build_static_router(&config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr} (port already in use?)"))?;

    info!(addr = %addr, root = %config.root.display(), "Static server running");
    info!("Open in browser: http://localhost:{}/", addr.port());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Static server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping...");
}
