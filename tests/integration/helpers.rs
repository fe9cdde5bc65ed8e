//! Shared test helpers for integration tests.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use bytes::Bytes;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use mediadesk_api::{AppState, build_app, serve};
use mediadesk_core::config::{AppConfig, ClientConfig};
use mediadesk_entity::USER_ID_HEADER;

const BOUNDARY: &str = "mediadesk-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// State shared with the router
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application over an empty store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config);
        let router = build_app(state.clone());
        Self { router, state }
    }

    /// Send a JSON request
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.request_as(method, path, body, None).await
    }

    /// Send a JSON request on behalf of `user_id`
    pub async fn request_as(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user_id: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(user_id) = user_id {
            req = req.header(USER_ID_HEADER, user_id);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Upload `(file name, content type, bytes)` parts as one batch
    pub async fn upload(&self, folder_id: &str, files: &[(&str, &str, &[u8])]) -> TestResponse {
        let mut body = Vec::new();
        push_text_part(&mut body, "folder_id", folder_id);
        for (name, mime, data) in files {
            push_file_part(&mut body, name, mime, data);
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/media/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Create a folder and return its ID
    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/media/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder create failed: {:?}",
            response.body
        );
        response.data()["id"]
            .as_str()
            .expect("folder id")
            .to_string()
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            raw,
            content_type,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body bytes
    pub raw: Bytes,
    /// Response content type
    pub content_type: Option<String>,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// A server listening on an ephemeral port
pub struct LiveServer {
    /// Client settings pointing at the server
    pub client: ClientConfig,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl LiveServer {
    /// Start a server with default configuration
    pub async fn start() -> Self {
        Self::start_with(AppConfig::default()).await
    }

    /// Start a server with custom configuration
    pub async fn start_with(config: AppConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let state = AppState::new(config);
        tokio::spawn(async move {
            let _ = serve(listener, state, Duration::from_secs(1), async {
                let _ = rx.await;
            })
            .await;
        });

        Self {
            client: ClientConfig {
                base_url: format!("http://{addr}"),
                ..ClientConfig::default()
            },
            shutdown: Some(tx),
        }
    }
}

impl Drop for LiveServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

fn push_text_part(body: &mut Vec<u8>, name: &str, value: &str) {
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
        .as_bytes(),
    );
}

fn push_file_part(body: &mut Vec<u8>, file_name: &str, mime: &str, data: &[u8]) {
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
}
