//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use corpus_core::rng::DeterministicRng;
use corpus_core::store::DocumentStore;
use corpus_passages::domain::eligibility::EligibilityPolicy;
use corpus_test_support::SequenceRng;
use http_body_util::BodyExt;
use tower::ServiceExt;

use corpus_api::auth::AuthConfig;
use corpus_api::state::AppState;

pub const USERNAME: &str = "annotator";
pub const PASSWORD: &str = "secret";

/// Build the full app router over `store` with an RNG that must not be drawn.
pub fn build_test_app(store: Arc<dyn DocumentStore>) -> Router {
    build_test_app_with_rng(store, SequenceRng::new(vec![]))
}

/// Build the full app router with a custom `SequenceRng` for tests that
/// control which passage numbers the sampler visits.
pub fn build_test_app_with_rng(store: Arc<dyn DocumentStore>, rng: SequenceRng) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(
        store,
        rng,
        EligibilityPolicy::default(),
        AuthConfig::new(USERNAME, PASSWORD),
    );
    corpus_api::app(app_state)
}

/// `Authorization` header value for the given pair.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Send a request and return status, headers, and the raw body.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body_bytes.to_vec())
}

/// Send an authenticated GET request and return the JSON response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(AUTHORIZATION, basic_auth(USERNAME, PASSWORD))
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Send an authenticated PUT request with a JSON body and return the JSON
/// response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header(AUTHORIZATION, basic_auth(USERNAME, PASSWORD))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let (status, _, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

/// Send a GET request with an optional `Authorization` header value.
pub async fn get_with_auth(
    app: Router,
    uri: &str,
    authorization: Option<&str>,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(AUTHORIZATION, value);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}
