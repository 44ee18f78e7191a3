//! Routes for dataset2 passage annotation.

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use corpus_core::error::DomainError;
use corpus_core::store::Document;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use corpus_passages::application::command_handlers;
use corpus_passages::application::export::{self, Dataset2Export};
use corpus_passages::application::query_handlers;
use corpus_passages::application::sampler::{self, BoundedRejectionSampler};
use corpus_passages::domain::commands::{PassagePatch, UpdatePassage};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of `GET /api/dataset2`.
#[derive(Debug, Default, Deserialize)]
pub struct PassageQuery {
    /// Any non-empty value asks for a random eligible passage.
    pub random: Option<String>,
    /// Fetch this passage directly.
    pub passage_id: Option<String>,
}

impl PassageQuery {
    fn wants_random(&self) -> bool {
        self.random.as_deref().is_some_and(|v| !v.is_empty())
    }
}

/// GET /api/dataset2?random=1 or GET /api/dataset2?passage_id=...
#[instrument(skip(state))]
async fn get_passage(
    State(state): State<AppState>,
    Query(params): Query<PassageQuery>,
) -> Result<Json<Option<Document>>, ApiError> {
    if params.wants_random() {
        let view = sampler::retrieve_random_passage(
            &*state.store,
            &state.rng,
            &state.eligibility,
            BoundedRejectionSampler::default(),
        )
        .await?;
        return Ok(Json(view));
    }

    match params.passage_id.as_deref().map(str::trim) {
        Some(passage_id) if !passage_id.is_empty() => {
            let view = query_handlers::get_passage(passage_id, &*state.store).await?;
            Ok(Json(view))
        }
        _ => Err(DomainError::Validation(
            "either random or passage_id must be given".into(),
        )
        .into()),
    }
}

/// PUT /api/dataset2/{passage_id}
#[instrument(skip(state, patch))]
async fn update_passage(
    State(state): State<AppState>,
    Path(passage_id): Path<String>,
    Json(patch): Json<PassagePatch>,
) -> Result<Json<bool>, ApiError> {
    let command = UpdatePassage {
        correlation_id: Uuid::new_v4(),
        passage_id,
        patch,
    };

    info!(correlation_id = %command.correlation_id, "handling update_passage command");

    command_handlers::handle_update_passage(&command, &*state.store).await?;

    Ok(Json(true))
}

/// GET /api/dataset2/download
#[instrument(skip(state))]
async fn download_all(State(state): State<AppState>) -> Result<Json<Dataset2Export>, ApiError> {
    let dataset = export::export_dataset2(None, &*state.store).await?;
    Ok(Json(dataset))
}

/// GET /api/dataset2/download/{team_id}
#[instrument(skip(state))]
async fn download_for_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Dataset2Export>, ApiError> {
    let dataset = export::export_dataset2(Some(&team_id), &*state.store).await?;
    Ok(Json(dataset))
}

/// Returns the router for dataset2.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dataset2", get(get_passage))
        .route("/api/dataset2/{passage_id}", put(update_passage))
        .route("/api/dataset2/download", get(download_all))
        .route("/api/dataset2/download/{team_id}", get(download_for_team))
}
