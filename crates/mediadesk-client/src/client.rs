//! HTTP client handle and request plumbing.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use mediadesk_core::config::ClientConfig;
use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::types::{FileId, FolderId, UserId, folder_param};
use mediadesk_entity::{ApiResponse, FileFilter, HealthResponse, MediaFile, USER_ID_HEADER};

use crate::error::{status_error, transport_error};

/// Raw content of a stored file.
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Content type reported by the server.
    pub mime_type: String,
    /// File bytes.
    pub data: Bytes,
}

/// [`MediaApi`](mediadesk_library::MediaApi) over the MediaDesk REST surface.
#[derive(Debug, Clone)]
pub struct HttpMediaApi {
    pub(crate) http: Client,
    base_url: Url,
    pub(crate) upload_timeout: Duration,
    user_id: Option<UserId>,
}

impl HttpMediaApi {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> AppResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url,
            upload_timeout: config.upload_timeout(),
            user_id: None,
        })
    }

    /// Send `x-user-id` with every request.
    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// The server this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an API path such as `/api/media/files`.
    pub fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::with_source(ErrorKind::Validation, format!("Invalid path '{path}'"), e))
    }

    /// Where the content of `id` can be downloaded.
    pub fn download_url(&self, id: FileId) -> AppResult<Url> {
        self.endpoint(&format!("/api/media/files/{id}/content"))
    }

    /// Server health.
    pub async fn health(&self) -> AppResult<HealthResponse> {
        let url = self.endpoint("/api/health")?;
        self.send(self.http.get(url)).await
    }

    /// Files in `folder_id` filtered on the server.
    pub async fn list_files_filtered(
        &self,
        folder_id: Option<FolderId>,
        filter: &FileFilter,
    ) -> AppResult<Vec<MediaFile>> {
        let mut url = self.endpoint("/api/media/files")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("folder_id", &folder_param(folder_id));
            if let Some(search) = filter.search.as_deref().map(str::trim)
                && !search.is_empty()
            {
                query.append_pair("search", search);
            }
            if let Some(file_type) = filter.file_type {
                query.append_pair("type", file_type.as_str());
            }
        }
        self.send(self.http.get(url)).await
    }

    /// Download the stored content of a file.
    pub async fn fetch_content(&self, id: FileId) -> AppResult<FileContent> {
        let url = self.download_url(id)?;
        let response = self
            .authorize(self.http.get(url))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let mime_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        Ok(FileContent {
            mime_type,
            data: body,
        })
    }

    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.user_id {
            Some(user_id) => request.header(USER_ID_HEADER, user_id.to_string()),
            None => request,
        }
    }

    /// Send a request and unwrap the `{success, data}` envelope.
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(path = %url, status = status.as_u16(), bytes = body.len(), "API response");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let envelope: ApiResponse<T> = serde_json::from_slice(&body)?;
        if !envelope.success {
            return Err(AppError::network("Server reported failure without an error body"));
        }
        Ok(envelope.data)
    }
}

fn parse_base_url(raw: &str) -> AppResult<Url> {
    // A trailing slash makes `join` append instead of replacing the last segment.
    let normalized = format!("{}/", raw.trim().trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid server URL '{raw}'"),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpMediaApi {
        HttpMediaApi::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let api = client("http://media.example.com/admin");
        assert_eq!(
            api.endpoint("/api/media/stats").unwrap().as_str(),
            "http://media.example.com/admin/api/media/stats"
        );
        let api = client("http://127.0.0.1:8080/");
        assert_eq!(
            api.endpoint("api/health").unwrap().as_str(),
            "http://127.0.0.1:8080/api/health"
        );
    }

    #[test]
    fn test_download_url() {
        let api = client("http://127.0.0.1:8080");
        let id = FileId::new();
        assert_eq!(
            api.download_url(id).unwrap().as_str(),
            format!("http://127.0.0.1:8080/api/media/files/{id}/content")
        );
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = HttpMediaApi::new(&ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
