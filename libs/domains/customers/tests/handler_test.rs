//! Handler tests for the Customers domain: registration CRUD plus the
//! login/profile session flow, run against the in-memory repository.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig};
use domain_customers::*;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn service() -> CustomerService<InMemoryCustomerRepository> {
    CustomerService::new(InMemoryCustomerRepository::new())
}

fn jwt_auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("customer-handler-test-secret-32chars!!"))
}

fn register_body() -> String {
    serde_json::to_string(&json!({
        "firstName": "Jane",
        "lastName": "Doe",
        "email": "jane@example.com",
        "phoneNumber": "0912345678",
        "address": "Hanoi",
        "birthday": "1995-04-12",
        "password": "secret"
    }))
    .unwrap()
}

#[tokio::test]
async fn test_register_customer_returns_201_without_credentials() {
    let app = handlers::router(service());

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(register_body()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = json_body(response.into_body()).await;
    assert_eq!(body["email"], "jane@example.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_rejects_invalid_phone_and_short_password() {
    let app = handlers::router(service());

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "firstName": "Jane",
                "lastName": "Doe",
                "email": "jane@example.com",
                "phoneNumber": "12345",
                "password": "ab"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email_returns_409() {
    let service = service();
    let app = handlers::router(service.clone());

    let first = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(register_body()))
        .unwrap();
    assert_eq!(
        app.clone().oneshot(first).await.unwrap().status(),
        StatusCode::CREATED
    );

    let second = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(register_body()))
        .unwrap();
    assert_eq!(
        app.oneshot(second).await.unwrap().status(),
        StatusCode::CONFLICT
    );
}

#[tokio::test]
async fn test_login_issues_verifiable_token_pair() {
    let service = service();
    service
        .create_customer(CreateCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            address: None,
            birthday: None,
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let jwt = jwt_auth();
    let app = auth_router(AuthState {
        service,
        jwt_auth: jwt.clone(),
    });

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "jane@example.com",
                "password": "secret"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tokens: LoginResponse = json_body(response.into_body()).await;
    let claims = jwt.verify_token(&tokens.token).unwrap();
    assert_eq!(claims.email, "jane@example.com");
    assert_eq!(claims.name, "Jane Doe");

    let refresh_claims = jwt.verify_refresh_token(&tokens.refresh_token).unwrap();
    assert_eq!(refresh_claims.sub, claims.sub);
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let service = service();
    service
        .create_customer(CreateCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            address: None,
            birthday: None,
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let app = auth_router(AuthState {
        service,
        jwt_auth: jwt_auth(),
    });

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "jane@example.com",
                "password": "wrong"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_and_accepts_bearer_token() {
    let service = service();
    let created = service
        .create_customer(CreateCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            address: None,
            birthday: None,
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let jwt = jwt_auth();
    let app = auth_router(AuthState {
        service,
        jwt_auth: jwt.clone(),
    });

    // Without a token: 401
    let bare = Request::builder()
        .method("GET")
        .uri("/profile")
        .body(Body::empty())
        .unwrap();
    assert_eq!(
        app.clone().oneshot(bare).await.unwrap().status(),
        StatusCode::UNAUTHORIZED
    );

    // With a valid token: the customer's own profile
    let token = jwt
        .create_access_token(&created.id, "jane@example.com", "Jane Doe")
        .unwrap();
    let request = Request::builder()
        .method("GET")
        .uri("/profile")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let profile: CustomerResponse = json_body(response.into_body()).await;
    assert_eq!(profile.email, "jane@example.com");
}

#[tokio::test]
async fn test_refresh_reissues_tokens() {
    let service = service();
    let created = service
        .create_customer(CreateCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            address: None,
            birthday: None,
            password: "secret".to_string(),
        })
        .await
        .unwrap();

    let jwt = jwt_auth();
    let refresh_token = jwt.create_refresh_token(&created.id).unwrap();
    let app = auth_router(AuthState {
        service,
        jwt_auth: jwt.clone(),
    });

    let request = Request::builder()
        .method("POST")
        .uri("/refresh")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({ "refreshToken": refresh_token })).unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let tokens: LoginResponse = json_body(response.into_body()).await;
    assert!(jwt.verify_token(&tokens.token).is_ok());
}
