//! Route modules organized by dataset.

pub mod dataset1;
pub mod dataset2;
pub mod health;
pub mod pages;
