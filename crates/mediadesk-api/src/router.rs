//! Route definitions for the MediaDesk HTTP API.
//!
//! All routes are mounted under `/api` and receive `AppState` through
//! Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Multipart framing allowance on top of the raw batch size.
const MULTIPART_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.server.request_timeout();

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .merge(upload_routes(&state));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

/// Health endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Folder CRUD and move
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/media/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/media/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/media/folders/{id}/move", put(handlers::folder::move_folder))
}

/// File listing, metadata, content, and stats
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/media/files", get(handlers::file::list_files))
        .route(
            "/media/files/{id}",
            put(handlers::file::update_file).delete(handlers::file::delete_file),
        )
        .route("/media/files/{id}/content", get(handlers::file::file_content))
        .route("/media/stats", get(handlers::file::stats))
}

/// Batch upload, sized for a full batch and exempt from the request timeout
fn upload_routes(state: &AppState) -> Router<AppState> {
    let upload = &state.config.upload;
    let batch_limit = upload
        .max_upload_size_bytes
        .saturating_mul(upload.max_batch_files as u64)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let batch_limit = usize::try_from(batch_limit).unwrap_or(usize::MAX);

    Router::new()
        .route("/media/upload", post(handlers::upload::upload))
        .layer(DefaultBodyLimit::max(batch_limit))
}
