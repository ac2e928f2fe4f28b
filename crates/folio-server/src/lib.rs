//! Folio Server - static file server for local development
//!
//! Serves the site directory with headers that stop the browser from
//! caching anything, so edits show up on the next reload.

use std::path::Path;

use axum::http::{header, HeaderValue};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub const DEFAULT_PORT: u16 = 8000;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

/// Create the router serving `root`
pub fn create_router(root: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(root.as_ref()))
        // Cache busting
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(NO_CACHE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn serve(addr: &str, root: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
    let root = root.as_ref();
    let app = create_router(root);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving {} at http://{}", root.display(), addr);
    axum::serve(listener, app).await?;
    Ok(())
}
