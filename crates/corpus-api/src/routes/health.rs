//! Liveness and store readiness.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use corpus_passages::domain::passage::PASSAGES_COLLECTION;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct StoreStatus {
    /// `ok` when the document store answered, `unavailable` otherwise.
    pub status: &'static str,
    /// Crate version of the running service.
    pub version: &'static str,
    /// Passage population the sampler would draw from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passages: Option<u64>,
}

/// GET /health
///
/// Counts the passage collection, so a store outage reports 503 rather than
/// surfacing on the first annotation request.
async fn store_status(State(state): State<AppState>) -> (StatusCode, Json<StoreStatus>) {
    let version = env!("CARGO_PKG_VERSION");
    match state.store.count(PASSAGES_COLLECTION).await {
        Ok(passages) => (
            StatusCode::OK,
            Json(StoreStatus {
                status: "ok",
                version,
                passages: Some(passages),
            }),
        ),
        Err(e) => {
            warn!(error = %e, "document store is not answering");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(StoreStatus {
                    status: "unavailable",
                    version,
                    passages: None,
                }),
            )
        }
    }
}

/// Routes outside basic auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(store_status))
}
