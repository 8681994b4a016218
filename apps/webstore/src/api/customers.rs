//! Customers API routes

use axum::Router;
use domain_customers::handlers;

use crate::state::AppState;

/// Create customers router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.customers.clone())
}
