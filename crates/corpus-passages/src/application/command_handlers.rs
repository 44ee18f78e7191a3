//! Command handlers for the passage annotation context.

use corpus_core::error::DomainError;
use corpus_core::store::DocumentStore;
use tracing::info;

use crate::domain::commands::UpdatePassage;
use crate::domain::passage::PASSAGES_COLLECTION;

/// Handles the `UpdatePassage` command: merges the typed patch into the
/// stored passage, deleting cleared fields.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank passage id,
/// `DomainError::DocumentNotFound` if the passage does not exist, or the
/// store's error if the update fails.
pub async fn handle_update_passage(
    command: &UpdatePassage,
    store: &dyn DocumentStore,
) -> Result<(), DomainError> {
    let passage_id = command.passage_id.trim();
    if passage_id.is_empty() {
        return Err(DomainError::Validation(
            "passage id must not be empty".into(),
        ));
    }

    let patch = command.patch.to_document_patch()?;
    store.update(PASSAGES_COLLECTION, passage_id, &patch).await?;

    info!(
        correlation_id = %command.correlation_id,
        passage_id,
        fields = patch.iter().count(),
        "passage updated"
    );
    Ok(())
}
