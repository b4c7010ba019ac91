//! Products API routes

use axum::Router;
use domain_products::{handlers, InMemoryUnitOfWorkFactory, ProductService};
use std::sync::Arc;

use crate::state::AppState;

/// Create products router over the shared store
pub fn router(state: &AppState) -> Router {
    let factory = InMemoryUnitOfWorkFactory::new(Arc::clone(&state.store));
    handlers::router(ProductService::new(factory))
}
