//! Commands for the text records context.

use corpus_core::error::DomainError;
use corpus_core::patch::FieldChange;
use corpus_core::store::DocumentPatch;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::records::{ANNOTATOR_FIELD, DISCOURSE_CLASS_FIELD, EDITED_TEXT_FIELD};

/// An integer discourse class. Accepts either a JSON number or a numeric
/// string, since the edit form submits the selected option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDiscourseClass", into = "i64")]
pub struct DiscourseClass(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDiscourseClass {
    Number(i64),
    Text(String),
}

impl TryFrom<RawDiscourseClass> for DiscourseClass {
    type Error = String;

    fn try_from(raw: RawDiscourseClass) -> Result<Self, Self::Error> {
        match raw {
            RawDiscourseClass::Number(n) => Ok(Self(n)),
            RawDiscourseClass::Text(s) => s
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| format!("discourse class must be an integer, got {s:?}")),
        }
    }
}

impl From<DiscourseClass> for i64 {
    fn from(class: DiscourseClass) -> Self {
        class.0
    }
}

/// Partial update of a text record, as submitted by the edit form.
#[derive(Debug, Clone, Deserialize)]
pub struct TextPatch {
    /// The record to update.
    pub id: String,
    /// Edited paragraphs.
    #[serde(rename = "dataset1_text", default)]
    pub edited_text: FieldChange<Vec<String>>,
    /// Discourse class. Clearing it also clears `annotator`, returning the
    /// record to the unannotated pool.
    #[serde(rename = "dataset1_class", default)]
    pub discourse_class: FieldChange<DiscourseClass>,
    /// Annotator tag.
    #[serde(default)]
    pub annotator: FieldChange<String>,
}

impl TextPatch {
    /// Converts this patch into a store-level patch.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a value cannot be encoded.
    pub fn to_document_patch(&self) -> Result<DocumentPatch, DomainError> {
        let mut patch = DocumentPatch::new();
        self.edited_text.write_into(EDITED_TEXT_FIELD, &mut patch)?;
        self.discourse_class
            .write_into(DISCOURSE_CLASS_FIELD, &mut patch)?;
        self.annotator.write_into(ANNOTATOR_FIELD, &mut patch)?;
        if self.discourse_class.is_clear() {
            patch.delete(ANNOTATOR_FIELD);
        }
        Ok(patch)
    }
}

/// Command to apply a partial update to a text record.
#[derive(Debug, Clone)]
pub struct UpdateText {
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The requested changes, including the target record id.
    pub patch: TextPatch,
}
