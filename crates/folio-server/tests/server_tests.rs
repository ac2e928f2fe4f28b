//! Router tests without a socket

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

use folio_server::create_router;

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Home</h1>").unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();
    dir
}

async fn get(dir: &TempDir, uri: &str) -> axum::response::Response {
    create_router(dir.path())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_serves_files_with_mime_type() {
    let dir = site();
    let response = get(&dir, "/style.css").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"body { margin: 0; }");
}

#[tokio::test]
async fn test_directory_serves_index() {
    let dir = site();
    let response = get(&dir, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html");
}

#[tokio::test]
async fn test_cache_busting_headers() {
    let dir = site();
    let response = get(&dir, "/index.html").await;

    let headers = response.headers();
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
    assert_eq!(headers[header::PRAGMA], "no-cache");
    assert_eq!(headers[header::EXPIRES], "0");
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = site();
    let response = get(&dir, "/missing.js").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache, no-store, must-revalidate");
}
