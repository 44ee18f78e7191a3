//! Routes for dataset1 text records.

use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use corpus_core::store::Document;
use tracing::{info, instrument};
use uuid::Uuid;

use corpus_texts::application::query_handlers::{self, Dataset1Entry};
use corpus_texts::application::command_handlers;
use corpus_texts::domain::commands::{TextPatch, UpdateText};

use crate::error::ApiError;
use crate::state::AppState;

/// PUT /api/dataset1_xyz/
#[instrument(skip_all, fields(text_id = %patch.id))]
async fn update_text(
    State(state): State<AppState>,
    Json(patch): Json<TextPatch>,
) -> Result<Json<bool>, ApiError> {
    let command = UpdateText {
        correlation_id: Uuid::new_v4(),
        patch,
    };

    info!(correlation_id = %command.correlation_id, "handling update_text command");

    command_handlers::handle_update_text(&command, &*state.store).await?;

    Ok(Json(true))
}

/// GET /api/dataset1/edit/{id}
#[instrument(skip(state))]
async fn get_text(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Document>>, ApiError> {
    let record = query_handlers::get_text_by_id(&id, &*state.store).await?;
    Ok(Json(record))
}

/// GET /api/dataset1/download/{team_id}
#[instrument(skip(state))]
async fn download(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<Dataset1Entry>>, ApiError> {
    let dataset = query_handlers::export_dataset1(&team_id, &*state.store).await?;
    Ok(Json(dataset))
}

/// Returns the router for dataset1.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/dataset1_xyz/", put(update_text))
        .route("/api/dataset1/edit/{id}", get(get_text))
        .route("/api/dataset1/download/{team_id}", get(download))
}
