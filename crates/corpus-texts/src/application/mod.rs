//! Command and query handlers for text records.

pub mod command_handlers;
pub mod query_handlers;
