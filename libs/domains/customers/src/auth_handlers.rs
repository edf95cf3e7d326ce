//! Session endpoints: login, token refresh, and the JWT-protected profile.
//!
//! Sessions are stateless: login verifies credentials and issues a 30-day
//! HS256 access/refresh token pair; nothing is stored server-side.

use axum::{
    extract::State,
    middleware,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{BadRequestValidationResponse, UnauthorizedResponse},
    jwt_auth_middleware, JwtAuth, JwtClaims, ValidatedJson,
};
use mongodb::bson::oid::ObjectId;
use utoipa::OpenApi;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{CustomerResponse, LoginRequest, LoginResponse, RefreshRequest};
use crate::repository::CustomerRepository;
use crate::service::CustomerService;

const TAG: &str = "auth";

/// OpenAPI documentation for Auth API
#[derive(OpenApi)]
#[openapi(
    paths(login, refresh, profile),
    components(
        schemas(LoginRequest, LoginResponse, RefreshRequest, CustomerResponse),
        responses(UnauthorizedResponse, BadRequestValidationResponse)
    ),
    tags(
        (name = TAG, description = "Customer session endpoints")
    )
)]
pub struct ApiDoc;

/// State shared by the auth endpoints.
#[derive(Clone)]
pub struct AuthState<R: CustomerRepository> {
    pub service: CustomerService<R>,
    pub jwt_auth: JwtAuth,
}

/// Create the auth router: login/refresh are public, profile requires a
/// bearer token.
pub fn auth_router<R: CustomerRepository + Clone + 'static>(state: AuthState<R>) -> Router {
    let protected = Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_auth.clone(),
            jwt_auth_middleware,
        ));

    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .merge(protected)
        .with_state(state)
}

/// Verify credentials and issue a token pair
#[utoipa::path(
    post,
    path = "/login",
    tag = TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Tokens issued", body = LoginResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn login<R: CustomerRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> CustomerResult<Json<LoginResponse>> {
    let customer = state
        .service
        .verify_credentials(&input.email, &input.password)
        .await?;

    let id = customer.id.to_hex();
    let token = state
        .jwt_auth
        .create_access_token(&id, &customer.email, &customer.full_name())
        .map_err(|e| CustomerError::Internal(format!("Token creation failed: {}", e)))?;
    let refresh_token = state
        .jwt_auth
        .create_refresh_token(&id)
        .map_err(|e| CustomerError::Internal(format!("Token creation failed: {}", e)))?;

    tracing::info!(customer_id = %id, "Customer logged in");
    Ok(Json(LoginResponse {
        token,
        refresh_token,
    }))
}

/// Exchange a refresh token for a fresh access token
#[utoipa::path(
    post,
    path = "/refresh",
    tag = TAG,
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Tokens reissued", body = LoginResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn refresh<R: CustomerRepository>(
    State(state): State<AuthState<R>>,
    Json(input): Json<RefreshRequest>,
) -> CustomerResult<Json<LoginResponse>> {
    let claims = state
        .jwt_auth
        .verify_refresh_token(&input.refresh_token)
        .map_err(|_| CustomerError::InvalidCredentials)?;

    let id: ObjectId = claims
        .sub
        .parse()
        .map_err(|_| CustomerError::InvalidCredentials)?;
    let customer = state.service.get_customer(id).await?;

    let token = state
        .jwt_auth
        .create_access_token(
            &claims.sub,
            &customer.email,
            &format!("{} {}", customer.first_name, customer.last_name),
        )
        .map_err(|e| CustomerError::Internal(format!("Token creation failed: {}", e)))?;
    let refresh_token = state
        .jwt_auth
        .create_refresh_token(&claims.sub)
        .map_err(|e| CustomerError::Internal(format!("Token creation failed: {}", e)))?;

    Ok(Json(LoginResponse {
        token,
        refresh_token,
    }))
}

/// Return the authenticated customer's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated customer", body = CustomerResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn profile<R: CustomerRepository>(
    State(state): State<AuthState<R>>,
    Extension(claims): Extension<JwtClaims>,
) -> CustomerResult<Json<CustomerResponse>> {
    let id: ObjectId = claims
        .sub
        .parse()
        .map_err(|_| CustomerError::InvalidCredentials)?;

    let customer = state.service.get_customer(id).await?;
    Ok(Json(customer))
}
