//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the webstore
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Webstore API",
        version = "0.1.0",
        description = "Product catalog lookup, filtering and customer listing"
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/customers", api = domain_customers::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Customers", description = "Customer listing")
    )
)]
pub struct ApiDoc;
