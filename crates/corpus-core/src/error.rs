//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A document was not found in its collection.
    #[error("document not found: {collection}/{id}")]
    DocumentNotFound {
        /// The collection that was searched.
        collection: String,
        /// The requested document identifier.
        id: String,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a `DocumentNotFound` error.
    #[must_use]
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::DocumentNotFound {
            collection: collection.to_owned(),
            id: id.to_owned(),
        }
    }
}
