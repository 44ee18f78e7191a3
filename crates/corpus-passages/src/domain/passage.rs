//! Stored passages.

use corpus_core::error::DomainError;
use corpus_core::store::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection holding passages.
pub const PASSAGES_COLLECTION: &str = "passages";

/// Width of a passage id: passage numbers are left-padded with zeros.
pub const PASSAGE_ID_WIDTH: usize = 10;

/// Stored field: id of the source text record.
pub const TEXT_ID_FIELD: &str = "text_id";
/// Stored field: source URL.
pub const URL_FIELD: &str = "url";
/// Stored field: role-annotated sentences.
pub const DATAPOINT_FIELD: &str = "dataset2_datapoint";
/// Stored field: acceptance flag.
pub const ACCEPTED_FIELD: &str = "is_accepted_dataset2_datapoint";
/// Stored field: annotator tag.
pub const ANNOTATOR_FIELD: &str = "annotator";

/// Served field: segmented text of the source record.
pub const ORIGINAL_TEXT_SPLIT_FIELD: &str = "original_text_split";
/// Served field: title of the source record.
pub const ORIGINAL_TEXT_TITLE_FIELD: &str = "original_text_title";

/// Formats a passage number as its document id, e.g. `7` → `"0000000007"`.
#[must_use]
pub fn id_with_zeros(number: u64) -> String {
    format!("{number:0width$}", width = PASSAGE_ID_WIDTH)
}

/// The source URL of a stored passage, if it is a string.
#[must_use]
pub fn source_url(document: &Document) -> Option<&str> {
    document.get(URL_FIELD).and_then(Value::as_str)
}

/// A sentence with the discourse role an annotator assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Position of the sentence within the annotated passage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_index: Option<u32>,
    /// Sentence text.
    pub sentence: String,
    /// Assigned role.
    pub role: String,
}

/// The annotated part of a passage, as read by the dataset2 export.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Passage {
    /// Zero-padded passage id.
    #[serde(default)]
    pub id: String,
    /// Id of the text record the passage was cut from.
    #[serde(default)]
    pub text_id: Option<String>,
    /// Source URL.
    #[serde(default)]
    pub url: String,
    /// Whether an annotator accepted the passage into dataset2.
    #[serde(rename = "is_accepted_dataset2_datapoint", default)]
    pub is_accepted: Option<bool>,
    /// Role-annotated sentences of an accepted passage.
    #[serde(rename = "dataset2_datapoint", default)]
    pub datapoint: Option<Vec<AnnotatedSentence>>,
    /// Annotator tag, e.g. `IE-5`.
    #[serde(default)]
    pub annotator: Option<String>,
    /// Publication date of the source, when known.
    #[serde(rename = "publication-date", default)]
    pub publication_date: Option<Value>,
}

impl Passage {
    /// Decodes a stored document. A missing `id` field falls back to the
    /// document key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if an annotated field has the
    /// wrong shape.
    pub fn from_document(document_id: &str, document: Document) -> Result<Self, DomainError> {
        let mut passage: Self = serde_json::from_value(Value::Object(document)).map_err(|e| {
            DomainError::Infrastructure(format!("passage {document_id} is malformed: {e}"))
        })?;
        if passage.id.is_empty() {
            document_id.clone_into(&mut passage.id);
        }
        Ok(passage)
    }

    /// Returns `true` if the passage has been accepted into dataset2.
    #[must_use]
    pub fn accepted(&self) -> bool {
        self.is_accepted.unwrap_or(false)
    }
}
