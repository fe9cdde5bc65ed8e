//! # mediadesk-api
//!
//! HTTP API layer for MediaDesk built on Axum.
//!
//! Exposes the media library REST surface over a
//! [`MemoryMediaStore`](mediadesk_store::MemoryMediaStore), with request
//! logging, CORS, compression, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server, serve};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
