//! Movies, shops and the store that owns them.

pub mod domain;
pub mod memory;
pub mod search;
pub mod store;

pub use domain::{MoveInput, Movie, MovieInput, MovieUpdate, Shop, ShopInput, ShopRef};
pub use memory::InMemoryCatalog;
pub use search::MovieQuery;
pub use store::CatalogStore;
