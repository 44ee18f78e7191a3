//! `PostgreSQL` implementation of the `DocumentStore` trait.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use corpus_core::error::DomainError;
use corpus_core::store::{Document, DocumentPatch, DocumentStore, FieldUpdate, Query};

/// PostgreSQL-backed document store.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Creates a new `PgDocumentStore`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[allow(clippy::needless_pass_by_value)]
fn infrastructure(err: sqlx::Error) -> DomainError {
    DomainError::Infrastructure(format!("document store: {err}"))
}

fn into_document(collection: &str, data: Value) -> Result<Document, DomainError> {
    match data {
        Value::Object(fields) => Ok(fields),
        other => Err(DomainError::Infrastructure(format!(
            "document in {collection} is not a JSON object: {other}"
        ))),
    }
}

/// Splits a patch into the object merged with `||` and the keys removed
/// with `-`.
fn split_patch(patch: &DocumentPatch) -> (Value, Vec<String>) {
    let mut merged = Map::new();
    let mut deleted = Vec::new();
    for (field, update) in patch.iter() {
        match update {
            FieldUpdate::Set(value) => {
                merged.insert(field.to_owned(), value.clone());
            }
            FieldUpdate::Delete => deleted.push(field.to_owned()),
        }
    }
    (Value::Object(merged), deleted)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DomainError> {
        let row: Option<(Value,)> = sqlx::query_as(
            "SELECT data FROM documents WHERE collection = $1 AND document_id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure)?;

        row.map(|(data,)| into_document(collection, data))
            .transpose()
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: &DocumentPatch,
    ) -> Result<(), DomainError> {
        let (merged, deleted) = split_patch(patch);
        debug!(collection, id, deleted = deleted.len(), "merging document patch");

        let result = sqlx::query(
            "UPDATE documents \
             SET data = (data || $3) - $4::text[], updated_at = NOW() \
             WHERE collection = $1 AND document_id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(merged)
        .bind(deleted)
        .execute(&self.pool)
        .await
        .map_err(infrastructure)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(collection, id));
        }
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<(String, Document)>, DomainError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT document_id, data FROM documents WHERE collection = ",
        );
        builder.push_bind(collection.to_owned());

        for filter in &query.filters {
            builder
                .push(" AND data -> ")
                .push_bind(filter.field.clone())
                .push(" = ")
                .push_bind(filter.value.clone());
        }

        match &query.order_by {
            Some(field) => {
                builder
                    .push(" AND data -> ")
                    .push_bind(field.clone())
                    .push(" IS NOT NULL ORDER BY data -> ")
                    .push_bind(field.clone())
                    .push(", document_id");
            }
            None => {
                builder.push(" ORDER BY document_id");
            }
        }

        let rows: Vec<(String, Value)> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure)?;

        rows.into_iter()
            .map(|(id, data)| into_document(collection, data).map(|doc| (id, doc)))
            .collect()
    }

    async fn count(&self, collection: &str) -> Result<u64, DomainError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM documents WHERE collection = $1")
                .bind(collection)
                .fetch_one(&self.pool)
                .await
                .map_err(infrastructure)?;

        u64::try_from(count)
            .map_err(|e| DomainError::Infrastructure(format!("invalid document count: {e}")))
    }
}
