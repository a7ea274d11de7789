//! Router construction and request helpers for HTTP tests.

use crate::test_helpers::StepClock;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use docket::{
    config::HttpConfig,
    http::build_router,
    record::{adapters::memory::InMemoryRecordRepository, ports::RecordRepository, services::RecordService},
};
use http_body_util::BodyExt;
use rstest::fixture;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Builds a router over an empty in-memory store with no static assets.
#[fixture]
pub fn app() -> Router {
    app_with_static_dir(std::env::temp_dir().join(format!("docket-missing-{}", uuid::Uuid::new_v4())))
}

/// Builds a router over an empty in-memory store serving `static_dir`.
pub fn app_with_static_dir(static_dir: PathBuf) -> Router {
    let repository: Arc<dyn RecordRepository> = Arc::new(InMemoryRecordRepository::new());
    let service = RecordService::new(repository, Arc::new(StepClock::default()));
    let config = HttpConfig {
        static_dir,
        ..HttpConfig::default()
    };
    build_router(service, &config)
}

/// Response captured as status, content type, and raw body.
pub struct Captured {
    /// Response status.
    pub status: StatusCode,
    /// `Content-Type` header, if any.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl Captured {
    /// Parses the body as JSON, or `Value::Null` when empty.
    pub fn json(&self) -> Value {
        if self.body.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }
}

/// Sends a request with an optional JSON body and captures the response.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Captured {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes()
        .to_vec();

    Captured {
        status,
        content_type,
        body,
    }
}

/// Sends a raw body with an explicit content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, content_type: &str, body: &str) -> Captured {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_owned()))
        .expect("valid request");
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("readable body")
        .to_bytes()
        .to_vec();
    Captured {
        status,
        content_type: None,
        body,
    }
}

/// Creates a record with `title` and returns its JSON representation.
pub async fn create(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/records", Some(body)).await;
    assert_eq!(response.status, StatusCode::CREATED, "create failed: {:?}", response.json());
    response.json()
}

/// Returns the titles of a JSON array of records.
pub fn titles(records: &Value) -> Vec<String> {
    records
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|record| record["title"].as_str().map(str::to_owned))
        .collect()
}
