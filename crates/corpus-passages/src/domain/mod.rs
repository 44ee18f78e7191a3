//! Passage types, eligibility rules, and commands.

pub mod commands;
pub mod eligibility;
pub mod passage;
