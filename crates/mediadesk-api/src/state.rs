//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use mediadesk_core::config::AppConfig;
use mediadesk_store::MemoryMediaStore;

/// Shared application state passed to all Axum handlers via `State`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Media records and content.
    pub store: MemoryMediaStore,
}

impl AppState {
    /// Build state with an empty store sized by `config.upload`.
    pub fn new(config: AppConfig) -> Self {
        let store = MemoryMediaStore::new(config.upload.clone());
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
