//! API routes module

pub mod customers;
pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::{create_router, health_router};
use tower_http::services::ServeDir;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/customers", customers::router(state))
}

/// Full application: API with docs and middleware, health endpoints and
/// uploaded files under `/resources`
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<ApiDoc>(routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(health::router(state.clone()))
        .nest_service("/resources", ServeDir::new(&state.config.upload_dir)))
}
