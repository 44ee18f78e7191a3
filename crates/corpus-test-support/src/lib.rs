//! Shared test doubles for the corpus annotation manager.

mod rng;
mod store;

pub use rng::{MockRng, SeededRng, SequenceRng};
pub use store::{FailingDocumentStore, InMemoryDocumentStore};
