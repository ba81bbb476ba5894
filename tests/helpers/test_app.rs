use super::test_db::{setup_test_db, TestDatabase};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use lucky::bootstrap::build_app_state;
use lucky::config::Config;
use lucky::infrastructure::http::router::build_router;
use serde_json::Value;
use tower::ServiceExt;

/// The full router over a fresh database, driven in-process
pub struct TestApp {
    pub router: Router,
    pub test_db: TestDatabase,
}

impl TestApp {
    pub async fn new() -> Self {
        let test_db = setup_test_db().await;
        let mut config = Config::from_lookup(|_| None).expect("default config is valid");
        config.retry_base_delay_ms = 5;
        let router = build_router(build_app_state(test_db.db().clone(), &config));
        Self { router, test_db }
    }

    /// Send a request and return the status with the decoded JSON body
    /// (`Value::Null` when the body is empty)
    pub async fn request(&self, method: Method, uri: &str, body: Option<Body>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.unwrap_or_else(Body::empty))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response is not JSON")
        };

        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(Body::from(payload.to_string())))
            .await
    }

    pub async fn patch(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(Body::from(payload.to_string())))
            .await
    }

    /// POST a fortune and return the created representation
    pub async fn create_fortune(&self, payload: &Value) -> Value {
        let (status, body) = self.post("/api/fortunes", payload).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body
    }
}
