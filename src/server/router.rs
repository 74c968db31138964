use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Json, Router, routing::get};

use super::api::{api_router, serve_upload};
use super::response::MessageResponse;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Public content root holding uploaded files.
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, uploads_dir: PathBuf) -> Self {
        Self {
            store,
            uploads_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn api_info() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        "Portfolio API - use /api/... to access the endpoints",
    ))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router(state.max_upload_bytes))
        .route("/uploads/{name}", get(serve_upload))
        .fallback(api_info)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
