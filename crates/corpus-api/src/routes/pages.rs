//! Static HTML pages and the not-found page.

use axum::http::{StatusCode, Uri};
use axum::response::Html;
use axum::{Router, routing::get};
use tracing::debug;

use crate::state::AppState;

const INDEX_PAGE: &str = include_str!("../../templates/index.html");
const DATASET1_PAGE: &str = include_str!("../../templates/dataset1.html");
const DATASET1_EDIT_PAGE: &str = include_str!("../../templates/dataset1_edit.html");
const DATASET2_EDIT_PAGE: &str = include_str!("../../templates/dataset2_edit.html");
const ABOUT_PAGE: &str = include_str!("../../templates/about.html");
const NOT_FOUND_PAGE: &str = include_str!("../../templates/404.html");

/// GET /
async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// GET /dataset1
async fn dataset1() -> Html<&'static str> {
    Html(DATASET1_PAGE)
}

/// GET /dataset1/edit
async fn dataset1_edit() -> Html<&'static str> {
    Html(DATASET1_EDIT_PAGE)
}

/// GET /dataset2/edit
async fn dataset2_edit() -> Html<&'static str> {
    Html(DATASET2_EDIT_PAGE)
}

/// GET /about
async fn about() -> Html<&'static str> {
    Html(ABOUT_PAGE)
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> (StatusCode, Html<&'static str>) {
    debug!(path = %uri.path(), "no route matched");
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE))
}

/// Pages that require credentials.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/dataset1", get(dataset1))
        .route("/dataset1/edit", get(dataset1_edit))
        .route("/dataset2/edit", get(dataset2_edit))
}

/// Pages open to everyone.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/about", get(about))
}
