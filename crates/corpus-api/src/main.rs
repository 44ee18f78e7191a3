//! Corpus manager API server entry point.

use std::sync::{Arc, Mutex};

use sqlx::postgres::PgPoolOptions;

use corpus_api::config::AppConfig;
use corpus_api::error::AppError;
use corpus_api::state::AppState;
use corpus_api::telemetry;
use corpus_core::rng::{DeterministicRng, SystemRng};
use corpus_document_store::pg_document_store::PgDocumentStore;
use corpus_passages::domain::eligibility::EligibilityPolicy;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting corpus manager API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::new()));
    let app_state = AppState::new(
        Arc::new(PgDocumentStore::new(pool)),
        rng,
        EligibilityPolicy::new(config.blocked_source_patterns.clone()),
        config.auth.clone(),
    );

    let addr = config.socket_addr()?;
    tracing::info!(%addr, username = config.auth.username(), "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, corpus_api::app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry.shutdown();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
