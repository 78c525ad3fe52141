//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tower::ServiceExt;

use acep_frame::models::{DuplicatePolicy, WakeWindow};
use acep_frame::server::{build_router, AppState};
use acep_frame::services::{ArtifactStore, FrameLibrary, RotationState};

/// Test application backed by a temporary output directory
pub struct TestApp {
    router: axum::Router,
    output: TempDir,
}

impl TestApp {
    /// Create a new test application with an empty output directory
    pub fn new() -> Self {
        let output = tempfile::tempdir().expect("Failed to create temp dir");
        let state = AppState::new(
            FrameLibrary::new(
                ArtifactStore::new(output.path(), DuplicatePolicy::Overwrite),
                RotationState::new(StdRng::seed_from_u64(42)),
            ),
            WakeWindow::default(),
        );

        Self {
            router: build_router(state),
            output,
        }
    }

    /// Directory the app serves frames from
    pub fn output_dir(&self) -> &Path {
        self.output.path()
    }

    /// Drop a frame file into the output directory
    pub fn add_frame(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.output.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write frame");
        path
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get a header value as string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
