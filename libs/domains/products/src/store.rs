//! Process-wide product storage shared by every request.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::Product;

/// Concurrent id -> product mapping.
///
/// Writes are atomic per key; readers always see whole records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Option<Product>;

    /// Insert or overwrite by id, returning the stored record
    async fn insert(&self, product: Product) -> Product;

    /// Overwrite a live record, keeping its `created_at`.
    ///
    /// `None` when the id is unknown or the record is already deleted; a
    /// deleted record is left untouched.
    async fn replace(&self, product: Product) -> Option<Product>;

    /// Set the deleted flag; `false` when the id is unknown
    async fn mark_deleted(&self, id: Uuid) -> bool;

    /// Cloned view of every record, deleted ones included
    async fn snapshot(&self) -> Vec<Product>;

    /// Mutex serializing name-uniqueness checks across all repositories
    fn name_lock(&self) -> Arc<tokio::sync::Mutex<()>>;
}

/// In-memory store backed by a `RwLock<HashMap>`
#[derive(Default)]
pub struct InMemoryDataStore {
    products: RwLock<HashMap<Uuid, Product>>,
    names: Arc<Mutex<()>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    async fn get(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    async fn insert(&self, product: Product) -> Product {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        product
    }

    async fn replace(&self, mut product: Product) -> Option<Product> {
        let mut products = self.products.write().await;
        let stored = products
            .get_mut(&product.id)
            .filter(|stored| !stored.is_deleted)?;

        product.created_at = stored.created_at;
        product.is_deleted = false;
        *stored = product.clone();
        Some(product)
    }

    async fn mark_deleted(&self, id: Uuid) -> bool {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) => {
                product.is_deleted = true;
                true
            }
            None => false,
        }
    }

    async fn snapshot(&self) -> Vec<Product> {
        self.products.read().await.values().cloned().collect()
    }

    fn name_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.names)
    }
}
