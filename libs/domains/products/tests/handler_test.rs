//! Handler tests for Products domain
//!
//! These drive the products router directly, without the application's
//! `/api` prefix or middleware, over a seeded in-memory catalog.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt; // For oneshot()

const BOUNDARY: &str = "webstore-test-boundary";

// Helper to parse JSON response body
async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> (Router, TempDir) {
    let uploads = tempfile::tempdir().unwrap();
    let router = app_with_store(AttachmentStore::new(uploads.path()));
    (router, uploads)
}

fn app_with_store(store: AttachmentStore) -> Router {
    let service = ProductService::new(seed::seeded_repository().unwrap());
    handlers::router(service, store)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    /// Part without a filename whose body is arbitrary bytes
    Raw(&'a str, &'a [u8]),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::Raw(name, contents) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(contents);
            }
            Part::File(name, filename, contents) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(contents);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/add")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn valid_fields() -> Vec<Part<'static>> {
    vec![
        Part::Text("productId", "P1237"),
        Part::Text("name", "Galaxy Tab"),
        Part::Text("unitPrice", "249.99"),
        Part::Text("manufacturer", "Samsung"),
        Part::Text("category", "Tablet"),
        Part::Text("unitsInStock", "40"),
        Part::Text("condition", "New"),
    ]
}

fn ids(products: &[Value]) -> Vec<&str> {
    products
        .iter()
        .map(|p| p["productId"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_products_returns_catalog_in_order() {
    let (app, _uploads) = app();

    for uri in ["/", "/all"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let products: Vec<Value> = json_body(response.into_body()).await;
        assert_eq!(ids(&products), ["P1234", "P1235", "P1236"]);
        assert_eq!(products[0]["unitPrice"], "500");
    }
}

#[tokio::test]
async fn test_get_product_by_id() {
    let (app, _uploads) = app();

    let response = app.oneshot(get("/product?id=P1236")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.name, "Nexus 7");
}

#[tokio::test]
async fn test_unknown_product_id_returns_404_with_details() {
    let (app, _uploads) = app();

    let response = app.oneshot(get("/product?id=P9999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["details"]["invalidProductId"], "P9999");
}

#[tokio::test]
async fn test_missing_query_parameters_use_error_envelope() {
    let (app, _uploads) = app();

    for uri in ["/product", "/product?name=Nexus", "/Tablet/price;low=1;high=500"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(
            response.headers()["content-type"],
            "application/json",
            "{}",
            uri
        );

        let body: Value = json_body(response.into_body()).await;
        assert_eq!(body["error"], "QUERY_EXTRACTION", "{}", uri);
        assert_eq!(body["code"], 1013);
    }
}

#[tokio::test]
async fn test_products_by_category() {
    let (app, _uploads) = app();

    let response = app.oneshot(get("/Laptop")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&products), ["P1235"]);
}

#[tokio::test]
async fn test_empty_category_returns_404() {
    let (app, _uploads) = app();

    let response = app.oneshot(get("/laptop")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "No products found in the category laptop");
}

#[tokio::test]
async fn test_filter_by_matrix_criteria() {
    let (app, _uploads) = app();

    let response = app
        .oneshot(get(
            "/filter/ByCriteria;category=Laptop,Tablet;manufacturer=Google;brand=Acme",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&products), ["P1236"]);
}

#[tokio::test]
async fn test_filter_without_criteria_returns_everything() {
    let (app, _uploads) = app();

    let response = app.oneshot(get("/filter/ByCriteria")).await.unwrap();
    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(products.len(), 3);
}

#[tokio::test]
async fn test_category_manufacturer_price_intersection() {
    let (app, _uploads) = app();

    let response = app
        .clone()
        .oneshot(get("/Tablet/price;low=200;high=300?manufacturer=Google"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products: Vec<Value> = json_body(response.into_body()).await;
    assert_eq!(ids(&products), ["P1236"]);

    let response = app
        .oneshot(get("/Tablet/price;low=300.01;high=400?manufacturer=Google"))
        .await
        .unwrap();
    let products: Vec<Value> = json_body(response.into_body()).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn test_malformed_price_is_rejected() {
    let (app, _uploads) = app();

    for uri in [
        "/Tablet/price;low=cheap;high=300?manufacturer=Google",
        "/Tablet/price;low=200?manufacturer=Google",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[tokio::test]
async fn test_add_product_returns_201_and_stores_attachments() {
    let (app, uploads) = app();

    let mut parts = valid_fields();
    parts.push(Part::File("productImage", "tab.png", b"\x89PNG-data"));
    parts.push(Part::File("pdfManual", "tab.pdf", b""));

    let response = app.clone().oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let product: Product = json_body(response.into_body()).await;
    assert_eq!(product.product_id, "P1237");
    assert_eq!(product.units_in_order(), 0);
    assert!(!product.is_discontinued());

    let image = uploads.path().join("images").join("P1237.png");
    assert_eq!(std::fs::read(image).unwrap(), b"\x89PNG-data");
    assert!(!uploads.path().join("pdfManuals").join("P1237.pdf").exists());

    let response = app.oneshot(get("/product?id=P1237")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_product_rejects_disallowed_fields() {
    let (app, _uploads) = app();

    let mut parts = valid_fields();
    parts.push(Part::Text("unitsInOrder", "100"));
    parts.push(Part::Text("discontinued", "true"));

    let response = app.clone().oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body["message"],
        "Attempting to bind disallowed fields: unitsInOrder, discontinued"
    );

    let response = app.oneshot(get("/product?id=P1237")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_product_with_duplicate_id_returns_409() {
    let (app, uploads) = app();

    let mut parts = valid_fields();
    parts[0] = Part::Text("productId", "P1234");
    parts.push(Part::File("productImage", "dup.png", b"png"));

    let response = app.oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(!uploads.path().join("images").join("P1234.png").exists());
}

#[tokio::test]
async fn test_add_product_reports_field_errors() {
    let (app, _uploads) = app();

    let mut parts = valid_fields();
    parts[0] = Part::Text("productId", "X-1");
    parts[1] = Part::Text("name", "TV");

    let response = app.oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["details"].as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn test_add_product_requires_multipart() {
    let (app, _uploads) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/add")
        .header("content-type", "application/json")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_product_ignores_unknown_binary_parts() {
    let (app, _uploads) = app();

    let mut parts = valid_fields();
    parts.push(Part::Raw("thumbnail", b"\xff\xfe\x00\x80"));

    let response = app.oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_with_same_id_keep_winners_attachment() {
    for _ in 0..20 {
        let (app, uploads) = app();

        let send = |image: &'static [u8]| {
            let app = app.clone();
            tokio::spawn(async move {
                let mut parts = valid_fields();
                parts.push(Part::File("productImage", "tab.png", image));
                let response = app.oneshot(multipart(&parts)).await.unwrap();
                (response.status(), image)
            })
        };

        let first = send(b"AAAA");
        let second = send(b"BBBB");
        let outcomes = [first.await.unwrap(), second.await.unwrap()];

        let winners: Vec<_> = outcomes
            .iter()
            .filter(|(status, _)| *status == StatusCode::CREATED)
            .collect();
        assert_eq!(winners.len(), 1, "{:?}", outcomes);
        assert!(outcomes
            .iter()
            .any(|(status, _)| *status == StatusCode::CONFLICT));

        let stored = std::fs::read(uploads.path().join("images").join("P1237.png")).unwrap();
        assert_eq!(stored, winners[0].1);
    }
}

#[tokio::test]
async fn test_failed_attachment_write_rolls_back_the_product() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the upload root should be makes every write fail
    let blocked = dir.path().join("blocked");
    std::fs::write(&blocked, b"").unwrap();
    let app = app_with_store(AttachmentStore::new(&blocked));

    let mut parts = valid_fields();
    parts.push(Part::File("productImage", "tab.png", b"png"));

    let response = app.clone().oneshot(multipart(&parts)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Product image saving failed");

    let response = app.oneshot(get("/product?id=P1237")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
