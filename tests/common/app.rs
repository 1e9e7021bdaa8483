//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{header::HOST, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use urlseal::models::AppConfig;
use urlseal::server::{build_router, create_app_state, AppState};
use urlseal::services::RuntimeMode;

/// Test application with router and direct access to state
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a test app in server mode from the given config
    pub fn new(config: AppConfig) -> Self {
        let state = create_app_state(config, RuntimeMode::Server);
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a GET request without a Host header
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a GET request with the given Host header
    pub async fn get_from_host(&self, host: &str, path: &str) -> TestResponse {
        self.get_with_headers(path, &[(HOST.as_str(), host)]).await
    }

    /// Make a GET request with custom headers
    pub async fn get_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::get(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
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
}
