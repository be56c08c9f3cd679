use std::sync::Arc;

use configs::StoreConfig;
use service::catalog::{CatalogStore, InMemoryCatalog};

/// Shared handler state. Built once at startup and cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogStore>) -> Self {
        Self { catalog }
    }

    /// Fresh, empty in-memory catalog.
    pub fn in_memory(options: StoreConfig) -> Self {
        let catalog: Arc<dyn CatalogStore> = InMemoryCatalog::new(options);
        Self::new(catalog)
    }
}
