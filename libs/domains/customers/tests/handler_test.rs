//! Handler tests for Customers domain

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_customers::*;
use http_body_util::BodyExt;
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_customers_returns_seeded_customers() {
    let app = handlers::router(CustomerService::new(seed::seeded_repository()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let customers: Vec<Customer> = json_body(response.into_body()).await;
    assert_eq!(customers, seed::demo_customers());
}

#[tokio::test]
async fn test_list_customers_on_empty_store() {
    let app = handlers::router(CustomerService::new(InMemoryCustomerRepository::new()));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let customers: Vec<Customer> = json_body(response.into_body()).await;
    assert!(customers.is_empty());
}
