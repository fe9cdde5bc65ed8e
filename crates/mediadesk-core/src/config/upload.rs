//! Upload limits.

use serde::{Deserialize, Serialize};

/// Upload and stored-file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum size of a single uploaded file in bytes (default 100 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Maximum number of files in one batch.
    #[serde(default = "default_max_batch_files")]
    pub max_batch_files: usize,
    /// Prefix prepended to stored file URLs.
    #[serde(default = "default_public_url_prefix")]
    pub public_url_prefix: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_size_bytes: default_max_upload(),
            max_batch_files: default_max_batch_files(),
            public_url_prefix: default_public_url_prefix(),
        }
    }
}

fn default_max_upload() -> u64 {
    100 * 1024 * 1024
}

fn default_max_batch_files() -> usize {
    50
}

fn default_public_url_prefix() -> String {
    "/api/media/files".to_string()
}
