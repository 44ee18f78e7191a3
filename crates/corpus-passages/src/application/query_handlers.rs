//! Query handlers for the passage annotation context.

use corpus_core::error::DomainError;
use corpus_core::store::{Document, DocumentStore};
use corpus_texts::application::query_handlers::get_text_by_id;
use corpus_texts::domain::records::{TEXT_SPLIT_FIELD, TITLE_FIELD};
use serde_json::Value;
use tracing::warn;

use crate::domain::passage::{
    ORIGINAL_TEXT_SPLIT_FIELD, ORIGINAL_TEXT_TITLE_FIELD, PASSAGES_COLLECTION, TEXT_ID_FIELD,
};

/// Adds `original_text_split` and `original_text_title` from the passage's
/// source record. Everything else is served as stored; a passage whose source
/// record is missing is returned without the two fields.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn with_original_text(
    passage_id: &str,
    mut passage: Document,
    store: &dyn DocumentStore,
) -> Result<Document, DomainError> {
    let source = match passage.get(TEXT_ID_FIELD).and_then(Value::as_str) {
        Some(text_id) => get_text_by_id(text_id, store).await?,
        None => None,
    };
    let Some(source) = source else {
        warn!(passage_id, text_id = ?passage.get(TEXT_ID_FIELD), "source text record not found");
        return Ok(passage);
    };

    if let Some(split) = source.get(TEXT_SPLIT_FIELD) {
        passage.insert(ORIGINAL_TEXT_SPLIT_FIELD.to_owned(), split.clone());
    }
    if let Some(title) = source.get(TITLE_FIELD) {
        passage.insert(ORIGINAL_TEXT_TITLE_FIELD.to_owned(), title.clone());
    }
    Ok(passage)
}

/// Retrieves a stored passage merged with its source text. Returns `None`
/// when the passage does not exist.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_passage(
    passage_id: &str,
    store: &dyn DocumentStore,
) -> Result<Option<Document>, DomainError> {
    match store.get(PASSAGES_COLLECTION, passage_id).await? {
        Some(passage) => with_original_text(passage_id, passage, store).await.map(Some),
        None => Ok(None),
    }
}
