//! Per-operation transaction boundary around the product repository.
//!
//! The in-memory store commits every write immediately, so committing a
//! unit only reports success and rolling back does nothing. Services still
//! go through the boundary so a durable backend can slot in later.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use crate::error::{ProductError, ProductResult};
use crate::repository::{ProductRepository, StoreProductRepository};
use crate::store::DataStore;

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Repository: ProductRepository;

    /// Repository scoped to this unit, created on first access.
    ///
    /// The check against disposal happens here, not on each repository call:
    /// fetch the repository again after anything that may have disposed the
    /// unit. The borrow keeps it from outliving the unit itself.
    fn products(&self) -> ProductResult<&Self::Repository>;

    /// Commit pending work, returning the number of committed units
    async fn save_changes(&self) -> ProductResult<usize>;

    async fn rollback(&self) -> ProductResult<()>;

    /// Release the unit; every later call fails with [`ProductError::Disposed`].
    ///
    /// Dropping a unit disposes it as well.
    fn dispose(&self);

    fn is_disposed(&self) -> bool;
}

/// Opens units of work; the service's only handle on storage
pub trait UnitOfWorkFactory: Send + Sync + 'static {
    type Unit: UnitOfWork;

    fn begin(&self) -> Self::Unit;
}

pub struct InMemoryUnitOfWork<S: DataStore> {
    store: Arc<S>,
    products: OnceLock<StoreProductRepository<S>>,
    disposed: AtomicBool,
}

impl<S: DataStore> InMemoryUnitOfWork<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            products: OnceLock::new(),
            disposed: AtomicBool::new(false),
        }
    }

    fn ensure_active(&self) -> ProductResult<()> {
        if self.disposed.load(Ordering::SeqCst) {
            return Err(ProductError::Disposed);
        }
        Ok(())
    }
}

#[async_trait]
impl<S: DataStore + 'static> UnitOfWork for InMemoryUnitOfWork<S> {
    type Repository = StoreProductRepository<S>;

    fn products(&self) -> ProductResult<&Self::Repository> {
        self.ensure_active()?;
        Ok(self
            .products
            .get_or_init(|| StoreProductRepository::new(Arc::clone(&self.store))))
    }

    async fn save_changes(&self) -> ProductResult<usize> {
        self.ensure_active()?;
        Ok(1)
    }

    async fn rollback(&self) -> ProductResult<()> {
        self.ensure_active()?;
        tracing::debug!("Rollback requested; in-memory writes are already applied");
        Ok(())
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl<S: DataStore> Drop for InMemoryUnitOfWork<S> {
    fn drop(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

/// Factory handing out units over one shared store
pub struct InMemoryUnitOfWorkFactory<S: DataStore> {
    store: Arc<S>,
}

impl<S: DataStore> InMemoryUnitOfWorkFactory<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: DataStore + 'static> UnitOfWorkFactory for InMemoryUnitOfWorkFactory<S> {
    type Unit = InMemoryUnitOfWork<S>;

    fn begin(&self) -> Self::Unit {
        InMemoryUnitOfWork::new(Arc::clone(&self.store))
    }
}
