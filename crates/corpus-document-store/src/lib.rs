//! PostgreSQL-backed document store.
//!
//! Each document is one JSONB row keyed by `(collection, document_id)`; see
//! the workspace `migrations/` directory for the table definition.

pub mod pg_document_store;
