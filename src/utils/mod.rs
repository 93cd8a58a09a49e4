//! Utility modules shared by capabilities and commands.

pub mod exec;
pub mod hash;
pub mod plural;

pub use plural::{plural_count, plural_count_with};
