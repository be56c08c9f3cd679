//! Shared building blocks for the movie shop workspace: log setup and
//! small wire types used by more than one crate.

pub mod types;
pub mod utils;
