//! Service layer for the movie shop catalog.
//! - `catalog` holds the domain records, the `CatalogStore` seam and its
//!   in-memory implementation.
//! - `errors` is the failure taxonomy surfaced to the HTTP layer.

pub mod catalog;
pub mod errors;
