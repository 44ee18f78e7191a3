//! Commands for the passage annotation context.

use corpus_core::error::DomainError;
use corpus_core::patch::FieldChange;
use corpus_core::store::DocumentPatch;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::passage::{ACCEPTED_FIELD, ANNOTATOR_FIELD, AnnotatedSentence, DATAPOINT_FIELD};

/// Partial update of a passage, as submitted by the annotation tool.
///
/// Accepting sends sentences, `true`, and the annotator; rejecting clears the
/// sentences and sends `false`; undo clears all three.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassagePatch {
    /// Role-annotated sentences.
    #[serde(rename = "dataset2_datapoint", default)]
    pub datapoint: FieldChange<Vec<AnnotatedSentence>>,
    /// Acceptance flag.
    #[serde(rename = "is_accepted_dataset2_datapoint", default)]
    pub is_accepted: FieldChange<bool>,
    /// Annotator tag.
    #[serde(default)]
    pub annotator: FieldChange<String>,
}

impl PassagePatch {
    /// Converts this patch into a store-level patch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a value cannot be encoded.
    pub fn to_document_patch(&self) -> Result<DocumentPatch, DomainError> {
        let mut patch = DocumentPatch::new();
        self.datapoint.write_into(DATAPOINT_FIELD, &mut patch)?;
        self.is_accepted.write_into(ACCEPTED_FIELD, &mut patch)?;
        self.annotator.write_into(ANNOTATOR_FIELD, &mut patch)?;
        Ok(patch)
    }
}

/// Command to apply a partial update to a passage.
#[derive(Debug, Clone)]
pub struct UpdatePassage {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The passage to update.
    pub passage_id: String,
    /// The requested changes.
    pub patch: PassagePatch,
}
