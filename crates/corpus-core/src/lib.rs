//! Corpus Core — shared abstractions for the annotation manager.
//!
//! This crate defines the document-store trait, typed partial updates, the
//! RNG seam, and the shared error type that both dataset contexts depend on.
//! It contains no infrastructure code.

pub mod annotator;
pub mod error;
pub mod patch;
pub mod rng;
pub mod store;
pub mod value;
