use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use moblog_api::server::build_static_router;
use moblog_core::config::StaticServerConfig;
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt; // .oneshot()

// ── Helper ────────────────────────────────────────────────────

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let public = dir.path().join("public");
    fs::create_dir_all(public.join("js")).unwrap();
    fs::write(public.join("index.html"), "<!doctype html><title>trainer</title>").unwrap();
    fs::write(public.join("js").join("game.js"), "console.log('ready');").unwrap();
    fs::write(dir.path().join("secret.txt"), "outside the root").unwrap();
    dir
}

fn config(dir: &TempDir) -> StaticServerConfig {
    StaticServerConfig {
        root: dir.path().join("public"),
        ..StaticServerConfig::default()
    }
}

fn request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_cors(resp: &axum::response::Response) {
    let h = resp.headers();
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,OPTIONS");
    assert_eq!(h[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
}

/// Formatted tracing output, collected for assertions.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

// ── Files ─────────────────────────────────────────────────────

#[tokio::test]
async fn root_serves_index_html() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::GET, "/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/html"));
    assert_cors(&resp);
    assert!(body_text(resp).await.contains("<title>trainer</title>"));
}

#[tokio::test]
async fn nested_file_gets_its_mime_type() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::GET, "/js/game.js"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE].to_str().unwrap().contains("javascript"));
    assert_cors(&resp);
}

#[tokio::test]
async fn missing_file_returns_404_with_cors() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::GET, "/nope.html"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_cors(&resp);
}

#[tokio::test]
async fn parent_directory_is_not_reachable() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::GET, "/../secret.txt"))
        .await
        .unwrap();

    assert_ne!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn directory_without_index_is_not_listed() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::GET, "/js/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_cors(&resp);
    assert!(!body_text(resp).await.contains("game.js"));
}

// ── Request logging ───────────────────────────────────────────

#[tokio::test]
async fn requests_are_logged_at_info() {
    let dir = site();
    let console = Captured::default();
    let writer = console.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_env_filter("info")
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let router = build_static_router(&config(&dir));
    let ok = router.clone().oneshot(request(Method::GET, "/index.html")).await.unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let missing = router.oneshot(request(Method::GET, "/missing.js")).await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let out = console.text();
    assert!(out.contains("uri=/index.html"), "output: {out}");
    assert!(out.contains("status=200"), "output: {out}");
    assert!(out.contains("uri=/missing.js"), "output: {out}");
    assert!(out.contains("status=404"), "output: {out}");
}

// ── Preflight ─────────────────────────────────────────────────

#[tokio::test]
async fn options_is_acknowledged() {
    let dir = site();
    let resp = build_static_router(&config(&dir))
        .oneshot(request(Method::OPTIONS, "/index.html"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_cors(&resp);
    assert_eq!(body_text(resp).await, r#"{"ok":true}"#);
}
