#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! These drive the REAL application router — real state, real storage,
//! real middleware — against a per-test temporary uploads directory.

#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use imghost::{AppState, Config, app};

/// API key used by every test app.
pub const TEST_API_KEY: &str = "test-api-key-123";

/// Minimal valid PNG: magic bytes plus some payload.
pub const PNG_IMAGE: &[u8] = &[
    0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D',
    b'R', 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00,
];

/// Minimal valid JPEG header.
pub const JPEG_IMAGE: &[u8] = &[
    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00,
];

/// Minimal valid GIF header.
pub const GIF_IMAGE: &[u8] = b"GIF89a\x01\x00\x01\x00\x00\x00\x00";

/// Plain text masquerading as nothing in particular.
pub const NOT_AN_IMAGE: &[u8] = b"hello, i am definitely a picture";

/// Test application wrapper over the real router and state.
pub struct TestApp {
    router: Router,
    pub upload_dir: TempDir,
}

impl TestApp {
    /// Create a test application with an isolated uploads directory.
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("failed to create temp uploads dir");

        let manifest_dir =
            std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());

        let config = Config {
            port: 0,
            api_key: TEST_API_KEY.to_string(),
            rollbar_token: None,
            environment: "test".to_string(),
            upload_dir: upload_dir.path().to_path_buf(),
            templates_dir: PathBuf::from(manifest_dir).join("templates"),
            allowed_extensions: vec![".jpg".into(), ".png".into(), ".gif".into()],
            max_upload_bytes: 20_000_000,
        };

        let state = AppState::new(&config)
            .await
            .expect("failed to initialize test AppState");

        Self {
            router: app(state),
            upload_dir,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// POST a multipart upload with the given API key and `file` field.
    pub async fn upload(
        &self,
        api_key: Option<&str>,
        filename: &str,
        data: &[u8],
    ) -> Response<Body> {
        self.upload_field(api_key, "file", filename, data).await
    }

    /// POST a multipart upload with an arbitrary field name.
    pub async fn upload_field(
        &self,
        api_key: Option<&str>,
        field_name: &str,
        filename: &str,
        data: &[u8],
    ) -> Response<Body> {
        let boundary = "x-test-boundary-7MA4YWxkTrZu0gW";
        let body = multipart_body(boundary, field_name, filename, data);

        let mut builder = Request::builder().method("POST").uri("/").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
        if let Some(key) = api_key {
            builder = builder.header("X-Api-Key", key);
        }

        let request = builder
            .body(Body::from(body))
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// POST an empty multipart form (no fields at all).
    pub async fn upload_empty(&self, api_key: Option<&str>) -> Response<Body> {
        let boundary = "x-test-boundary-7MA4YWxkTrZu0gW";
        let body = format!("--{boundary}--\r\n");

        let mut builder = Request::builder().method("POST").uri("/").header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        );
        if let Some(key) = api_key {
            builder = builder.header("X-Api-Key", key);
        }

        let request = builder
            .body(Body::from(body))
            .expect("failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// Number of files currently in the uploads directory.
    pub fn stored_file_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .expect("failed to read uploads dir")
            .count()
    }
}

/// Build a single-field multipart/form-data body.
fn multipart_body(boundary: &str, field_name: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("failed to collect body")
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body was not valid JSON")
}
