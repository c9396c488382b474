//! In-memory application fixture
//!
//! Builds the full router on in-memory stores with cheap hashing parameters,
//! and keeps handles on the stores so tests can seed or inspect them.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use workboard::backend::auth::{HashParams, MemoryCredentialStore, MemorySessionStore, PasswordHasher};
use workboard::backend::policy::OwnershipStore;
use workboard::backend::routes::create_router;
use workboard::backend::server::{AppState, Stores};
use workboard::backend::workspace::store::MemoryWorkspaceStore;
use workboard::shared::AppConfig;

/// Hashing parameters light enough for tests
pub const TEST_HASH_PARAMS: HashParams = HashParams {
    memory_kib: 1024,
    iterations: 1,
    parallelism: 1,
    output_len: 32,
};

/// A router plus handles on its stores
pub struct TestApp {
    pub state: AppState,
    pub sessions: Arc<MemorySessionStore>,
    pub workspace: Arc<MemoryWorkspaceStore>,
}

/// A response with its body already read
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// Every `Set-Cookie` value on the response
    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|value| value.to_str().unwrap().to_string())
            .collect()
    }

    /// The `error` field of a JSON error body
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let workspace = Arc::new(MemoryWorkspaceStore::new());
        Self::build(config, workspace.clone(), workspace)
    }

    /// App whose policies consult `ownership` instead of the workspace store
    pub fn with_ownership(ownership: Arc<dyn OwnershipStore>) -> Self {
        Self::build(AppConfig::default(), Arc::new(MemoryWorkspaceStore::new()), ownership)
    }

    fn build(config: AppConfig, workspace: Arc<MemoryWorkspaceStore>, ownership: Arc<dyn OwnershipStore>) -> Self {
        let sessions = Arc::new(MemorySessionStore::new());
        let stores = Stores {
            sessions: sessions.clone(),
            credentials: Arc::new(MemoryCredentialStore::new()),
            boards: workspace.clone(),
            ownership,
        };

        let state = AppState::new(config, PasswordHasher::with_params(TEST_HASH_PARAMS), stores);
        Self { state, sessions, workspace }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Send a request through a fresh router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::GET, uri, cookie, None)).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, cookie, Some(body))).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.send(request(Method::PUT, uri, cookie, Some(body))).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.send(request(Method::DELETE, uri, cookie, None)).await
    }
}

/// Build a request with an optional session cookie and JSON body
pub fn request(method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}
