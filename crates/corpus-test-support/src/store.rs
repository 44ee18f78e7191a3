//! Test stores — `DocumentStore` implementations for tests.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use corpus_core::error::DomainError;
use corpus_core::store::{Document, DocumentPatch, DocumentStore, Query};
use serde_json::Value;

/// A document store held in memory. Documents are kept per collection in id
/// order, and every `get` call is counted so tests can assert on read volume.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: Mutex<HashMap<String, BTreeMap<String, Document>>>,
    updates: Mutex<Vec<(String, String, DocumentPatch)>>,
    get_calls: AtomicUsize,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document. `document` must be a JSON object.
    ///
    /// # Panics
    ///
    /// Panics if `document` is not an object or the internal mutex is
    /// poisoned.
    pub fn insert(&self, collection: &str, id: &str, document: Value) {
        let Value::Object(fields) = document else {
            panic!("seeded document {collection}/{id} must be a JSON object");
        };
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_owned())
            .or_default()
            .insert(id.to_owned(), fields);
    }

    /// Returns the current contents of a document, if present.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn document(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    /// Number of `get` calls served so far.
    #[must_use]
    pub fn get_calls(&self) -> usize {
        self.get_calls.load(AtomicOrdering::SeqCst)
    }

    /// Returns a snapshot of all successful updates, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn applied_updates(&self) -> Vec<(String, String, DocumentPatch)> {
        self.updates.lock().unwrap().clone()
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, DomainError> {
        self.get_calls.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self.document(collection, id))
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: &DocumentPatch,
    ) -> Result<(), DomainError> {
        {
            let mut collections = self.collections.lock().unwrap();
            let document = collections
                .get_mut(collection)
                .and_then(|docs| docs.get_mut(id))
                .ok_or_else(|| DomainError::not_found(collection, id))?;
            patch.apply_to(document);
        }
        self.updates
            .lock()
            .unwrap()
            .push((collection.to_owned(), id.to_owned(), patch.clone()));
        Ok(())
    }

    async fn query(
        &self,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<(String, Document)>, DomainError> {
        let collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get(collection) else {
            return Ok(vec![]);
        };

        let mut matches: Vec<(String, Document)> = docs
            .iter()
            .filter(|(_, doc)| {
                query
                    .filters
                    .iter()
                    .all(|f| doc.get(&f.field) == Some(&f.value))
            })
            .filter(|(_, doc)| query.order_by.as_ref().is_none_or(|field| doc.contains_key(field)))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect();

        if let Some(field) = &query.order_by {
            matches.sort_by(|(_, a), (_, b)| compare_values(&a[field], &b[field]));
        }
        Ok(matches)
    }

    async fn count(&self, collection: &str) -> Result<u64, DomainError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }
}

/// A document store that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingDocumentStore;

#[async_trait]
impl DocumentStore for FailingDocumentStore {
    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<Document>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(
        &self,
        _collection: &str,
        _id: &str,
        _patch: &DocumentPatch,
    ) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn query(
        &self,
        _collection: &str,
        _query: &Query,
    ) -> Result<Vec<(String, Document)>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn count(&self, _collection: &str) -> Result<u64, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
