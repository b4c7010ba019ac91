//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes (nested under `/api` by `create_router`)
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/products", products::router(state))
}

/// Assemble the full application: API, docs, health and readiness
pub async fn app(state: &AppState) -> eyre::Result<Router> {
    let probes = health_router(state.config.app).merge(health::router(state.clone()));
    let router = create_router::<ApiDoc>(routes(state), probes, &state.config.server).await?;

    Ok(router)
}
