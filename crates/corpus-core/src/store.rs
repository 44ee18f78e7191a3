//! Document store abstraction.
//!
//! Documents are flat JSON objects addressed by `(collection, id)`. The store
//! supports point reads, partial field merges (with a delete sentinel),
//! equality-filtered queries, and collection counts.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::DomainError;

/// A stored document: a JSON object of top-level fields.
pub type Document = Map<String, Value>;

/// A single field change within a [`DocumentPatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Overwrite the field with the given value.
    Set(Value),
    /// Delete sentinel: remove the field from the document.
    Delete,
}

/// A partial update applied to an existing document. Fields not named in the
/// patch are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    changes: BTreeMap<String, FieldUpdate>,
}

impl DocumentPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field` to `value`, replacing any earlier change to the same field.
    pub fn set(&mut self, field: impl Into<String>, value: Value) -> &mut Self {
        self.changes.insert(field.into(), FieldUpdate::Set(value));
        self
    }

    /// Remove `field`, replacing any earlier change to the same field.
    pub fn delete(&mut self, field: impl Into<String>) -> &mut Self {
        self.changes.insert(field.into(), FieldUpdate::Delete);
        self
    }

    /// Returns the change recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldUpdate> {
        self.changes.get(field)
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Iterates over the changes in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldUpdate)> {
        self.changes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply this patch to an in-memory document.
    pub fn apply_to(&self, document: &mut Document) {
        for (field, update) in &self.changes {
            match update {
                FieldUpdate::Set(value) => {
                    document.insert(field.clone(), value.clone());
                }
                FieldUpdate::Delete => {
                    document.remove(field);
                }
            }
        }
    }
}

/// An equality filter on a top-level field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    /// Field name.
    pub field: String,
    /// Value the field must equal.
    pub value: Value,
}

/// A collection query: equality filters combined with AND, plus an optional
/// ascending sort field. Documents lacking the sort field are excluded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Filters that every returned document satisfies.
    pub filters: Vec<FieldFilter>,
    /// Field to sort ascending by.
    pub order_by: Option<String>,
}

impl Query {
    /// Create a query matching every document in the collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Sort ascending by `field`.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }
}

/// Repository trait over the hosted document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load a single document. Returns `None` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DomainError>;

    /// Merge `patch` into an existing document.
    ///
    /// Returns `DomainError::DocumentNotFound` if the document does not exist.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: &DocumentPatch,
    ) -> Result<(), DomainError>;

    /// Run a filtered query against a collection. Each match is returned
    /// with its document key.
    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<(String, Document)>, DomainError>;

    /// Count the documents in a collection.
    async fn count(&self, collection: &str) -> Result<u64, DomainError>;
}
