//! Dataset2 export.
//!
//! Without an annotator filter the export is the finished dataset: every
//! accepted passage reshaped into plain sentences and metadata. With a filter
//! it is a review list of one annotator's decisions.

use corpus_core::annotator::annotator_tag;
use corpus_core::error::DomainError;
use corpus_core::store::{DocumentStore, Query};
use corpus_core::value::is_truthy;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::passage::{ACCEPTED_FIELD, ANNOTATOR_FIELD, PASSAGES_COLLECTION, Passage};

/// One sentence of an exported passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceEntry {
    /// Assigned role.
    pub role: String,
    /// Sentence text.
    pub sentence: String,
}

/// Provenance of an exported passage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset2Metadata {
    /// Source text record id.
    pub text_id: Option<String>,
    /// Source URL.
    pub source: String,
    /// Annotator tag.
    pub annotator: Option<String>,
    /// Publication date of the source, when known.
    #[serde(rename = "publication-date", skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<Value>,
}

/// One accepted dataset2 datapoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset2Entry {
    /// Passage id.
    pub id: String,
    /// Role-annotated sentences.
    pub text: Vec<SentenceEntry>,
    /// Provenance.
    pub metadata: Dataset2Metadata,
}

/// One annotator decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    /// Passage id.
    pub id: String,
    /// Whether the passage was accepted.
    pub is_accepted: bool,
}

/// Result of a dataset2 export; serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Dataset2Export {
    /// All accepted passages.
    Accepted(Vec<Dataset2Entry>),
    /// One annotator's decisions.
    Reviewed(Vec<ReviewEntry>),
}

impl Dataset2Export {
    /// Number of exported records.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Accepted(entries) => entries.len(),
            Self::Reviewed(entries) => entries.len(),
        }
    }

    /// Returns `true` if nothing was exported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn to_dataset_entry(passage: Passage) -> Dataset2Entry {
    let text = passage
        .datapoint
        .unwrap_or_default()
        .into_iter()
        .map(|s| SentenceEntry {
            role: s.role,
            sentence: s.sentence,
        })
        .collect();

    Dataset2Entry {
        id: passage.id,
        text,
        metadata: Dataset2Metadata {
            text_id: passage.text_id,
            source: passage.url,
            annotator: passage.annotator,
            publication_date: passage.publication_date.filter(is_truthy),
        },
    }
}

/// Exports dataset2. With `annotator_id`, lists that annotator's decisions
/// ordered by acceptance flag; otherwise reshapes every accepted passage.
/// Passages whose annotated fields cannot be read are skipped.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn export_dataset2(
    annotator_id: Option<&str>,
    store: &dyn DocumentStore,
) -> Result<Dataset2Export, DomainError> {
    let query = match annotator_id {
        Some(id) => Query::new()
            .where_eq(ANNOTATOR_FIELD, annotator_tag(id))
            .order_by(ACCEPTED_FIELD),
        None => Query::new().where_eq(ACCEPTED_FIELD, true),
    };

    let mut passages = Vec::new();
    for (document_id, document) in store.query(PASSAGES_COLLECTION, &query).await? {
        match Passage::from_document(&document_id, document) {
            Ok(passage) => passages.push(passage),
            Err(e) => warn!(passage_id = %document_id, error = %e, "skipping unreadable passage"),
        }
    }

    let export = match annotator_id {
        Some(_) => Dataset2Export::Reviewed(
            passages
                .into_iter()
                .map(|p| ReviewEntry {
                    is_accepted: p.accepted(),
                    id: p.id,
                })
                .collect(),
        ),
        None => Dataset2Export::Accepted(passages.into_iter().map(to_dataset_entry).collect()),
    };

    info!(annotator_id, records = export.len(), "exported dataset2");
    Ok(export)
}
