//! HTTP handlers for Customers API

use axum::{extract::State, routing::get, Json, Router};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CustomerResult;
use crate::models::Customer;
use crate::repository::CustomerRepository;
use crate::service::CustomerService;

/// OpenAPI documentation for Customers API
#[derive(OpenApi)]
#[openapi(
    paths(list_customers),
    components(
        schemas(Customer),
        responses(InternalServerErrorResponse)
    ),
    tags(
        (name = "Customers", description = "Customer listing")
    )
)]
pub struct ApiDoc;

/// Create the customers router
pub fn router<R: CustomerRepository + 'static>(service: CustomerService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_customers))
        .with_state(shared_service)
}

/// List all customers
#[utoipa::path(
    get,
    path = "",
    tag = "Customers",
    responses(
        (status = 200, description = "All customers", body = Vec<Customer>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_customers<R: CustomerRepository>(
    State(service): State<Arc<CustomerService<R>>>,
) -> CustomerResult<Json<Vec<Customer>>> {
    let customers = service.get_all_customers().await?;
    Ok(Json(customers))
}
