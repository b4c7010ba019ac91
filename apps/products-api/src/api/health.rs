//! Readiness endpoint

use axum::{extract::State, response::Response, routing::get, Router};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use domain_products::DataStore;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> Response {
    let store: HealthCheckFuture = Box::pin(async move {
        let products = state.store.snapshot().await.len();
        tracing::debug!(products, "Product store reachable");
        Ok::<_, String>(())
    });
    run_health_checks(vec![("store", store)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/ready", get(ready)).with_state(state)
}
