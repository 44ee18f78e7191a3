//! Command handlers, queries, the random sampler, and dataset2 export.

pub mod command_handlers;
pub mod export;
pub mod query_handlers;
pub mod sampler;
