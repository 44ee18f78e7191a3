//! Integration tests for `PgDocumentStore`.
//!
//! These need a live PostgreSQL server reachable through `DATABASE_URL`; run
//! them with `cargo test -- --ignored`.

use corpus_core::error::DomainError;
use corpus_core::store::{DocumentPatch, DocumentStore, Query};
use corpus_document_store::pg_document_store::PgDocumentStore;
use serde_json::{Value, json};
use sqlx::PgPool;

async fn seed(pool: &PgPool, collection: &str, id: &str, data: Value) {
    sqlx::query("INSERT INTO documents (collection, document_id, data) VALUES ($1, $2, $3)")
        .bind(collection)
        .bind(id)
        .bind(data)
        .execute(pool)
        .await
        .unwrap();
}

// --- get ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_returns_none_for_missing_document(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let doc = store.get("passages", "0000000001").await.unwrap();

    assert!(doc.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_get_returns_stored_fields(pool: PgPool) {
    seed(&pool, "passages", "0000000001", json!({ "id": "0000000001", "url": "u" })).await;
    let store = PgDocumentStore::new(pool);

    let doc = store.get("passages", "0000000001").await.unwrap().unwrap();

    assert_eq!(doc["url"], json!("u"));
}

// --- update ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_merges_and_deletes_fields(pool: PgPool) {
    seed(
        &pool,
        "passages",
        "0000000002",
        json!({ "id": "0000000002", "annotator": "IE-1", "dataset2_datapoint": [] }),
    )
    .await;
    let store = PgDocumentStore::new(pool);

    let mut patch = DocumentPatch::new();
    patch
        .set("is_accepted_dataset2_datapoint", json!(false))
        .delete("dataset2_datapoint");
    store.update("passages", "0000000002", &patch).await.unwrap();

    let doc = store.get("passages", "0000000002").await.unwrap().unwrap();
    assert_eq!(doc["is_accepted_dataset2_datapoint"], json!(false));
    assert_eq!(doc["annotator"], json!("IE-1"));
    assert!(!doc.contains_key("dataset2_datapoint"));
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_update_missing_document_returns_not_found(pool: PgPool) {
    let store = PgDocumentStore::new(pool);

    let result = store
        .update("passages", "0000000099", &DocumentPatch::new())
        .await;

    assert!(matches!(result, Err(DomainError::DocumentNotFound { .. })));
}

// --- query / count ---

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_query_filters_and_orders(pool: PgPool) {
    seed(&pool, "texts2", "a", json!({ "annotator": "IE-1", "dataset1_class": 2 })).await;
    seed(&pool, "texts2", "b", json!({ "annotator": "IE-1", "dataset1_class": 0 })).await;
    seed(&pool, "texts2", "c", json!({ "annotator": "IE-1" })).await;
    seed(&pool, "texts2", "d", json!({ "annotator": "IE-2", "dataset1_class": 1 })).await;
    let store = PgDocumentStore::new(pool);

    let query = Query::new()
        .where_eq("annotator", "IE-1")
        .order_by("dataset1_class");
    let docs = store.query("texts2", &query).await.unwrap();

    let keyed: Vec<(String, Value)> = docs
        .into_iter()
        .map(|(id, d)| (id, d["dataset1_class"].clone()))
        .collect();
    assert_eq!(keyed, vec![("b".to_owned(), json!(0)), ("a".to_owned(), json!(2))]);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_count_is_scoped_to_collection(pool: PgPool) {
    seed(&pool, "passages", "0000000001", json!({})).await;
    seed(&pool, "passages", "0000000002", json!({})).await;
    seed(&pool, "texts2", "t", json!({})).await;
    let store = PgDocumentStore::new(pool);

    assert_eq!(store.count("passages").await.unwrap(), 2);
}
