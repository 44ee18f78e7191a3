//! Command handlers for the text records context.

use corpus_core::error::DomainError;
use corpus_core::store::DocumentStore;
use tracing::info;

use crate::domain::commands::UpdateText;
use crate::domain::records::TEXTS_COLLECTION;

/// Handles the `UpdateText` command: validates the target id and merges the
/// patch into the stored record.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the patch names no record,
/// `DomainError::DocumentNotFound` if the record does not exist, or the
/// store's error if the update fails.
pub async fn handle_update_text(
    command: &UpdateText,
    store: &dyn DocumentStore,
) -> Result<(), DomainError> {
    let text_id = command.patch.id.trim();
    if text_id.is_empty() {
        return Err(DomainError::Validation("text id must not be empty".into()));
    }

    let patch = command.patch.to_document_patch()?;
    store.update(TEXTS_COLLECTION, text_id, &patch).await?;

    info!(
        correlation_id = %command.correlation_id,
        text_id,
        cleared_label = command.patch.discourse_class.is_clear(),
        "text record updated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use corpus_core::error::DomainError;
    use corpus_test_support::{FailingDocumentStore, InMemoryDocumentStore};
    use serde_json::json;
    use uuid::Uuid;

    use super::handle_update_text;
    use crate::domain::commands::{TextPatch, UpdateText};

    fn command(body: serde_json::Value) -> UpdateText {
        UpdateText {
            correlation_id: Uuid::new_v4(),
            patch: serde_json::from_value(body).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_handle_update_text_labels_record() {
        let store = InMemoryDocumentStore::new();
        store.insert("texts2", "t1", json!({ "id": "t1", "title": "Speech" }));

        let cmd = command(json!({
            "id": "t1",
            "dataset1_text": ["One."],
            "dataset1_class": 3,
            "annotator": "IE-2"
        }));
        handle_update_text(&cmd, &store).await.unwrap();

        let doc = store.document("texts2", "t1").unwrap();
        assert_eq!(doc["dataset1_class"], json!(3));
        assert_eq!(doc["annotator"], json!("IE-2"));
        assert_eq!(doc["title"], json!("Speech"));
    }

    #[tokio::test]
    async fn test_handle_update_text_unlabels_record() {
        let store = InMemoryDocumentStore::new();
        store.insert(
            "texts2",
            "t1",
            json!({ "id": "t1", "dataset1_class": 3, "annotator": "IE-2" }),
        );

        let cmd = command(json!({ "id": "t1", "dataset1_class": null }));
        handle_update_text(&cmd, &store).await.unwrap();

        let doc = store.document("texts2", "t1").unwrap();
        assert!(!doc.contains_key("dataset1_class"));
        assert!(!doc.contains_key("annotator"));
    }

    #[tokio::test]
    async fn test_handle_update_text_rejects_blank_id() {
        let store = InMemoryDocumentStore::new();
        let cmd = UpdateText {
            correlation_id: Uuid::new_v4(),
            patch: TextPatch {
                id: "  ".to_owned(),
                edited_text: corpus_core::patch::FieldChange::Keep,
                discourse_class: corpus_core::patch::FieldChange::Keep,
                annotator: corpus_core::patch::FieldChange::Keep,
            },
        };

        let result = handle_update_text(&cmd, &store).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(store.applied_updates().is_empty());
    }

    #[tokio::test]
    async fn test_handle_update_text_missing_record_is_not_found() {
        let store = InMemoryDocumentStore::new();
        let cmd = command(json!({ "id": "nope", "dataset1_class": 1 }));

        let result = handle_update_text(&cmd, &store).await;

        assert!(matches!(result, Err(DomainError::DocumentNotFound { .. })));
    }

    #[tokio::test]
    async fn test_handle_update_text_propagates_store_failure() {
        let cmd = command(json!({ "id": "t1", "dataset1_class": 1 }));

        let result = handle_update_text(&cmd, &FailingDocumentStore).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
