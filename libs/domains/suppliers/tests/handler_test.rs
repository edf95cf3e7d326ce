//! Handler tests for the Suppliers domain, run against the in-memory repository.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_suppliers::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> axum::Router {
    let service = SupplierService::new(InMemorySupplierRepository::new());
    handlers::router(service)
}

#[tokio::test]
async fn test_create_supplier_returns_201() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "FPT Trading",
                "email": "contact@fpt.example.com",
                "phoneNumber": "0912345678",
                "address": "Hanoi"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let supplier: SupplierResponse = json_body(response.into_body()).await;
    assert_eq!(supplier.name, "FPT Trading");
    assert_eq!(supplier.phone_number, "0912345678");
}

#[tokio::test]
async fn test_create_supplier_rejects_invalid_phone() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "name": "FPT Trading",
                "phoneNumber": "12345"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_supplier_unknown_id_returns_404() {
    let app = app();

    let request = Request::builder()
        .method("GET")
        .uri("/65f0a1b2c3d4e5f6a7b8c9d0")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
