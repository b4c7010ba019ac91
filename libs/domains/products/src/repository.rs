use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilter};
use crate::store::DataStore;

/// Repository trait for Product persistence
///
/// Absence is reported through `Option`/`bool`; turning it into a
/// not-found error is left to the service.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or overwrite a product by id
    async fn create(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID; deleted products are hidden unless `include_deleted`
    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> ProductResult<Option<Product>>;

    /// Overwrite an existing product; `None` when the id is unknown
    async fn update(&self, product: Product) -> ProductResult<Option<Product>>;

    /// Flag a product as deleted; `false` when the id is unknown
    async fn soft_delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Filter, order and paginate; returns the page and the unpaginated match count
    async fn list(&self, filter: &ProductFilter) -> ProductResult<(Vec<Product>, usize)>;

    /// Case-insensitive name match among non-deleted products
    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> ProductResult<bool>;

    /// Acquire the uniqueness lock shared by every repository over the same store.
    ///
    /// Hold the guard across `name_exists` and the write it gates.
    async fn lock_names(&self) -> OwnedMutexGuard<()>;
}

/// Repository over any [`DataStore`]
pub struct StoreProductRepository<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> StoreProductRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

/// Whitespace-only filters are ignored; others match exactly as given
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[async_trait]
impl<S: DataStore> ProductRepository for StoreProductRepository<S> {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let product = self.store.insert(product).await;
        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid, include_deleted: bool) -> ProductResult<Option<Product>> {
        Ok(self
            .store
            .get(id)
            .await
            .filter(|p| include_deleted || !p.is_deleted))
    }

    async fn update(&self, product: Product) -> ProductResult<Option<Product>> {
        let id = product.id;
        let updated = self.store.replace(product).await;
        if updated.is_some() {
            tracing::info!(product_id = %id, "Updated product");
        }
        Ok(updated)
    }

    async fn soft_delete(&self, id: Uuid) -> ProductResult<bool> {
        let found = self.store.mark_deleted(id).await;
        if found {
            tracing::info!(product_id = %id, "Soft-deleted product");
        }
        Ok(found)
    }

    async fn list(&self, filter: &ProductFilter) -> ProductResult<(Vec<Product>, usize)> {
        let keyword = non_blank(&filter.keyword).map(str::to_lowercase);
        let category = non_blank(&filter.category).map(str::to_lowercase);

        let mut matches: Vec<Product> = self
            .store
            .snapshot()
            .await
            .into_iter()
            .filter(|p| filter.include_deleted || !p.is_deleted)
            .filter(|p| {
                keyword
                    .as_ref()
                    .is_none_or(|k| p.name.to_lowercase().contains(k.as_str()))
            })
            .filter(|p| {
                category
                    .as_ref()
                    .is_none_or(|c| p.category.to_lowercase() == *c)
            })
            .collect();

        // Oldest first; id breaks ties so pages are stable
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matches.len();
        let skip = filter.page.saturating_sub(1).saturating_mul(filter.page_size);
        let items = matches
            .into_iter()
            .skip(skip)
            .take(filter.page_size)
            .collect();

        Ok((items, total))
    }

    async fn name_exists(&self, name: &str, exclude_id: Option<Uuid>) -> ProductResult<bool> {
        let name = name.to_lowercase();
        Ok(self.store.snapshot().await.iter().any(|p| {
            !p.is_deleted && Some(p.id) != exclude_id && p.name.to_lowercase() == name
        }))
    }

    async fn lock_names(&self) -> OwnedMutexGuard<()> {
        self.store.name_lock().lock_owned().await
    }
}
