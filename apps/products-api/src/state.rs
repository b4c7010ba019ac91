//! Application state management

use domain_products::InMemoryDataStore;
use std::sync::Arc;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<InMemoryDataStore>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: Arc::new(InMemoryDataStore::new()),
        }
    }
}
