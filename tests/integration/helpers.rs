//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use notihub_api::{AppState, build_router, build_state};
use notihub_core::config::AppConfig;

/// Header carrying the producer secret in tests.
pub const SECRET_HEADER: &str = "x-notify-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the journal and registry
    pub state: AppState,
    /// Journal location
    pub journal_path: PathBuf,
    /// Keeps the journal directory alive
    _dir: Option<TempDir>,
}

impl TestApp {
    /// Create an app with a fresh journal and no shared secret
    pub async fn new() -> Self {
        Self::with_secret("").await
    }

    /// Create an app with a fresh journal and the given shared secret
    pub async fn with_secret(secret: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("journal.json");
        let mut app = Self::with_journal(&path, secret).await;
        app._dir = Some(dir);
        app
    }

    /// Create an app over an existing journal path
    pub async fn with_journal(path: &Path, secret: &str) -> Self {
        let mut config = AppConfig::default();
        config.journal.path = path.to_string_lossy().into_owned();
        config.auth.shared_secret = secret.to_string();
        config.realtime.channel_buffer_size = 16;

        let state = build_state(config).await.expect("Failed to build state");
        let router = build_router(state.clone());

        Self {
            router,
            state,
            journal_path: path.to_path_buf(),
            _dir: None,
        }
    }

    /// POST an event to the ingestion endpoint
    pub async fn notify(&self, body: Value, secret: Option<&str>) -> TestResponse {
        let body = serde_json::to_string(&body).expect("Failed to serialize body");
        self.request("POST", "/api/notify", Some(body), secret).await
    }

    /// Make a request against the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
        secret: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(secret) = secret {
            req = req.header(SECRET_HEADER, secret);
        }

        let req = req
            .body(Body::from(body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Serve the router on an ephemeral local port
    pub async fn spawn_server(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("No local addr");
        let router = self.router.clone();

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server failed");
        });

        addr
    }

    /// Wait until the registry reports `expected` connections
    pub async fn wait_for_connections(&self, expected: usize) {
        let registry = &self.state.realtime.registry;
        for _ in 0..200 {
            if registry.connection_count() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "Expected {} connections, registry has {}",
            expected,
            registry.connection_count()
        );
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
