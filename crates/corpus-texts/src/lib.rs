//! Corpus manager — dataset1 text classification context.
//!
//! Text records hold an original split text and title. Annotating teams edit
//! the paragraphs, assign a discourse class, and export their labeled
//! records as dataset1.

pub mod application;
pub mod domain;
