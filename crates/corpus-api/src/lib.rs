//! Corpus manager HTTP server.
//!
//! Serves the annotation pages and the JSON API for dataset1 text labels and
//! dataset2 passage annotation. Everything except `/about`, `/health`, and
//! the not-found page sits behind HTTP Basic authentication.

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

use crate::routes::{dataset1, dataset2, health, pages};
use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(pages::protected_router())
        .merge(dataset1::router())
        .merge(dataset2::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .merge(protected)
        .merge(health::router())
        .merge(pages::public_router())
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
