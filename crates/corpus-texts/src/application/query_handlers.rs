//! Query handlers for the text records context.
//!
//! This module contains the single-record lookup used by the edit page and
//! the dataset1 export.

use corpus_core::annotator::annotator_tag;
use corpus_core::error::DomainError;
use corpus_core::store::{Document, DocumentStore, Query};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::records::{
    ANNOTATOR_FIELD, DISCOURSE_CLASS_FIELD, LabeledText, TEXTS_COLLECTION,
};

/// One exported dataset1 datapoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset1Entry {
    /// Text record identifier.
    pub id: String,
    /// Edited paragraphs.
    pub text: Vec<String>,
    /// Assigned discourse class.
    pub discourse_type: i64,
}

/// Retrieves a text record by id, exactly as stored. Returns `None` when it
/// does not exist.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_text_by_id(
    text_id: &str,
    store: &dyn DocumentStore,
) -> Result<Option<Document>, DomainError> {
    store.get(TEXTS_COLLECTION, text_id).await
}

/// Exports the records labeled by `team_id`, ordered by discourse class.
/// Records whose labeled fields cannot be read are skipped with a warning.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn export_dataset1(
    team_id: &str,
    store: &dyn DocumentStore,
) -> Result<Vec<Dataset1Entry>, DomainError> {
    let query = Query::new()
        .where_eq(ANNOTATOR_FIELD, annotator_tag(team_id))
        .order_by(DISCOURSE_CLASS_FIELD);
    let documents = store.query(TEXTS_COLLECTION, &query).await?;

    let mut dataset = Vec::with_capacity(documents.len());
    for (document_id, document) in documents {
        let record = match LabeledText::from_document(&document_id, document) {
            Ok(record) => record,
            Err(e) => {
                warn!(text_id = %document_id, error = %e, "skipping unreadable text record");
                continue;
            }
        };
        let Some(discourse_type) = record.discourse_class else {
            warn!(text_id = %record.id, "skipping labeled text without a discourse class");
            continue;
        };
        dataset.push(Dataset1Entry {
            id: record.id,
            text: record.edited_text.unwrap_or_default(),
            discourse_type,
        });
    }

    info!(team_id, records = dataset.len(), "exported dataset1");
    Ok(dataset)
}
