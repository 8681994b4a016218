//! HTTP handlers for Products API

use axum::{
    extract::{
        multipart::MultipartRejection, rejection::QueryRejection, DefaultBodyLimit, Multipart,
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    AppError, MatrixParams,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::attachments::{AttachmentKind, AttachmentStore};
use crate::error::{ProductError, ProductResult};
use crate::form::ProductForm;
use crate::models::{PriceRange, Product, ProductAttribute, ProductFilter};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Largest accepted add-product body, attachments included
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        list_all_products,
        get_products_by_category,
        get_products_by_filter,
        get_product_by_id,
        filter_products,
        add_product,
    ),
    components(
        schemas(Product, ProductAttribute, ProductUploadForm),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

struct ProductsState<R: ProductRepository> {
    service: ProductService<R>,
    attachments: AttachmentStore,
}

type SharedState<R> = Arc<ProductsState<R>>;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    attachments: AttachmentStore,
) -> Router {
    let state = Arc::new(ProductsState {
        service,
        attachments,
    });

    Router::new()
        .route("/", get(list_products))
        .route("/all", get(list_all_products))
        .route(
            "/add",
            post(add_product).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/product", get(get_product_by_id))
        .route("/filter/{criteria}", get(get_products_by_filter))
        .route("/{category}", get(get_products_by_category))
        .route("/{category}/{price}", get(filter_products))
        .with_state(state)
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductIdQuery {
    /// Product id, e.g. `P1234`
    pub id: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManufacturerQuery {
    pub manufacturer: String,
}

/// Multipart body accepted by `POST /add`
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ProductUploadForm {
    #[schema(example = "P1237")]
    product_id: String,
    name: String,
    #[schema(example = "249.99")]
    unit_price: String,
    description: Option<String>,
    manufacturer: Option<String>,
    category: Option<String>,
    units_in_stock: Option<u64>,
    condition: Option<String>,
    language: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    product_image: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pdf_manual: Option<Vec<u8>>,
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products in catalog order", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<SharedState<R>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.service.get_all_products().await?;
    Ok(Json(products))
}

/// List all products
#[utoipa::path(
    get,
    path = "/all",
    tag = "Products",
    responses(
        (status = 200, description = "All products in catalog order", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_all_products<R: ProductRepository>(
    State(state): State<SharedState<R>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.service.get_all_products().await?;
    Ok(Json(products))
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/{category}",
    tag = "Products",
    params(
        ("category" = String, Path, description = "Exact, case-sensitive category")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products_by_category<R: ProductRepository>(
    State(state): State<SharedState<R>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = state.service.get_products_by_category(&category).await?;
    if products.is_empty() {
        return Err(ProductError::NoProductsInCategory(category));
    }
    Ok(Json(products))
}

/// Filter products by attribute
///
/// `criteria` is a matrix segment such as
/// `ByCriteria;category=Laptop,Tablet;manufacturer=Google`. Unknown attributes
/// are ignored.
#[utoipa::path(
    get,
    path = "/filter/{criteria}",
    tag = "Products",
    params(
        ("criteria" = String, Path, description = "Matrix segment of attribute=values pairs")
    ),
    responses(
        (status = 200, description = "Matching products, unordered", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products_by_filter<R: ProductRepository>(
    State(state): State<SharedState<R>>,
    Path(criteria): Path<String>,
) -> ProductResult<Json<HashSet<Product>>> {
    let filter = ProductFilter::from_raw(MatrixParams::parse(&criteria).into_map());
    let products = state.service.get_products_by_filter(filter).await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/product",
    tag = "Products",
    params(ProductIdQuery),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_id<R: ProductRepository>(
    State(state): State<SharedState<R>>,
    query: Result<Query<ProductIdQuery>, QueryRejection>,
) -> ProductResult<Json<Product>> {
    let Query(query) = query?;
    let product = state.service.get_product_by_id(&query.id).await?;
    Ok(Json(product))
}

/// Products in a category, from a manufacturer, inside a price range
///
/// `price` is a matrix segment `price;low=200;high=400`; both bounds are
/// inclusive.
#[utoipa::path(
    get,
    path = "/{category}/{price}",
    tag = "Products",
    params(
        ("category" = String, Path, description = "Exact, case-sensitive category"),
        ("price" = String, Path, description = "Matrix segment carrying low and high"),
        ManufacturerQuery
    ),
    responses(
        (status = 200, description = "Matching products in catalog order", body = Vec<Product>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn filter_products<R: ProductRepository>(
    State(state): State<SharedState<R>>,
    Path((category, price)): Path<(String, String)>,
    query: Result<Query<ManufacturerQuery>, QueryRejection>,
) -> ProductResult<Json<Vec<Product>>> {
    let Query(query) = query?;
    let range = price_range(&MatrixParams::parse(&price))?;
    let products = state
        .service
        .filter_products(&category, &query.manufacturer, range)
        .await?;
    Ok(Json(products))
}

fn price_range(params: &MatrixParams) -> ProductResult<PriceRange> {
    let bound = |key: &str| {
        params
            .first(key)
            .ok_or_else(|| ProductError::InvalidPrice(format!("missing '{}' bound", key)))
    };
    PriceRange::parse(bound("low")?, bound("high")?)
}

/// Add a product
///
/// Accepts the product fields plus optional `productImage` and `pdfManual`
/// files. Submitting `unitsInOrder` or `discontinued` rejects the form.
#[utoipa::path(
    post,
    path = "/add",
    tag = "Products",
    request_body(content = ProductUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product added", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(state): State<SharedState<R>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let upload = ProductForm::from_multipart(multipart?)
        .await?
        .into_upload()?;

    let product = state.service.add_product(upload.product).await?;

    // The id is now reserved, so no concurrent add can write these files
    let attachments = [
        (AttachmentKind::Image, upload.image),
        (AttachmentKind::Manual, upload.manual),
    ];
    for (kind, contents) in &attachments {
        let Some(contents) = contents else {
            continue;
        };
        if let Err(err) = state.attachments.save(*kind, &product.product_id, contents).await {
            for (kind, _) in &attachments {
                state.attachments.discard(*kind, &product.product_id).await;
            }
            state.service.remove_product(&product.product_id).await?;
            return Err(err.into());
        }
    }

    Ok((StatusCode::CREATED, Json(product)))
}
