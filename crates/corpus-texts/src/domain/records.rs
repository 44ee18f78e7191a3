//! Stored text records.

use corpus_core::error::DomainError;
use corpus_core::store::Document;
use serde::Deserialize;
use serde_json::Value;

/// Collection holding text records.
pub const TEXTS_COLLECTION: &str = "texts2";

/// Stored field: title of the original text.
pub const TITLE_FIELD: &str = "title";
/// Stored field: the original text, split into segments.
pub const TEXT_SPLIT_FIELD: &str = "text_split";
/// Stored field: edited paragraphs.
pub const EDITED_TEXT_FIELD: &str = "dataset1_text";
/// Stored field: integer discourse class.
pub const DISCOURSE_CLASS_FIELD: &str = "dataset1_class";
/// Stored field: annotator tag of the team that labeled the record.
pub const ANNOTATOR_FIELD: &str = "annotator";

/// The labeled part of a text record, as read by the dataset1 export. Other
/// stored fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabeledText {
    /// Record identifier.
    #[serde(default)]
    pub id: String,
    /// Paragraphs as edited by the annotating team.
    #[serde(rename = "dataset1_text", default)]
    pub edited_text: Option<Vec<String>>,
    /// Assigned discourse class.
    #[serde(rename = "dataset1_class", default)]
    pub discourse_class: Option<i64>,
}

impl LabeledText {
    /// Decodes a stored document. A missing `id` field falls back to the
    /// document key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if a labeled field has the wrong
    /// shape.
    pub fn from_document(document_id: &str, document: Document) -> Result<Self, DomainError> {
        let mut record: Self = serde_json::from_value(Value::Object(document)).map_err(|e| {
            DomainError::Infrastructure(format!("text record {document_id} is malformed: {e}"))
        })?;
        if record.id.is_empty() {
            document_id.clone_into(&mut record.id);
        }
        Ok(record)
    }
}
