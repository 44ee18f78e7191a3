//! Corpus manager — dataset2 passage annotation context.
//!
//! Passages are sequentially numbered excerpts of source texts. Annotators
//! draw random eligible passages, mark sentence roles, accept or reject the
//! passage, and export the accepted set as dataset2.

pub mod application;
pub mod domain;
