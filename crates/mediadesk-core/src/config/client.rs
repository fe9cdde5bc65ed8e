//! Client-side configuration for talking to a MediaDesk server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the MediaDesk server, without a trailing `/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for ordinary requests in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Timeout for a whole upload batch in seconds.
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_seconds: u64,
}

impl ClientConfig {
    /// Ordinary request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Upload batch timeout.
    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_seconds)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_seconds: default_request_timeout(),
            upload_timeout_seconds: default_upload_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_upload_timeout() -> u64 {
    600
}
