//! Shared helpers for HTTP integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use rstest::fixture;
use serde_json::Value;
use taskdeck::api::{self, AppState};
use taskdeck::task::{
    adapters::memory::{InMemoryTaskRepository, static_tasks},
    services::TaskStores,
};
use tower::ServiceExt;

/// Router plus a handle on the repository standing in for `PostgreSQL`.
pub struct TestApp {
    /// Application router.
    pub router: Router,
    /// Repository registered as the persistent store.
    pub persistent: InMemoryTaskRepository,
}

/// Captured response status and body.
pub struct TestResponse {
    /// Response status.
    pub status: StatusCode,
    /// Raw response body.
    pub body: Bytes,
}

impl TestResponse {
    /// Parses the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not valid JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }
}

fn fixture_stores() -> TaskStores {
    let fixtures = static_tasks().expect("fixture titles are valid");
    TaskStores::new(Arc::new(InMemoryTaskRepository::seeded(fixtures)))
}

/// Provides an application whose persistent store is an empty in-memory
/// repository.
#[fixture]
pub fn app() -> TestApp {
    let persistent = InMemoryTaskRepository::new();
    let stores = fixture_stores().with_persistent(Arc::new(persistent.clone()));
    TestApp {
        router: api::router(AppState::new(stores)),
        persistent,
    }
}

/// Provides an application with no persistent store configured.
#[fixture]
pub fn static_only_app() -> Router {
    api::router(AppState::new(fixture_stores()))
}

/// Sends a request through the router and collects the response.
///
/// # Panics
///
/// Panics if the request cannot be built or the body cannot be collected.
pub async fn send(router: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |text| Body::from(text.to_owned())))
        .expect("request should build");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    TestResponse { status, body }
}
