//! Text record types and commands.

pub mod commands;
pub mod records;
