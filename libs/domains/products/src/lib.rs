//! Products Domain
//!
//! CRUD over an in-memory product catalogue with soft-delete, case-insensitive
//! name uniqueness and paginated listing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, uniqueness, not-found rules, DTO mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Unit of Work│  ← Per-operation boundary, lazily opens the repository
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Filtering, paging, name checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Data Store  │  ← Shared id -> product map
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use domain_products::{handlers, InMemoryDataStore, InMemoryUnitOfWorkFactory, ProductService};
//!
//! let store = Arc::new(InMemoryDataStore::new());
//! let service = ProductService::new(InMemoryUnitOfWorkFactory::new(store));
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod store;
pub mod unit_of_work;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProductDto, ListProductsQuery, Product, ProductDto, ProductFilter, ProductPage,
    UpdateProductDto,
};
pub use repository::{ProductRepository, StoreProductRepository};
pub use service::ProductService;
pub use store::{DataStore, InMemoryDataStore};
pub use unit_of_work::{InMemoryUnitOfWork, InMemoryUnitOfWorkFactory, UnitOfWork, UnitOfWorkFactory};
