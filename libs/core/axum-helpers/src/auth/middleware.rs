use super::jwt::JwtAuth;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract JWT from Authorization header: "Bearer <token>"
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// JWT authentication middleware.
///
/// Validates the bearer token from the Authorization header and inserts
/// [`super::JwtClaims`] into request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::routing::get;
/// use axum::Router;
/// use axum_helpers::{jwt_auth_middleware, JwtAuth, JwtConfig};
///
/// let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!!"));
///
/// let protected: Router = Router::new()
///     .route("/profile", get(profile_handler))
///     .route_layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No JWT found in Authorization header");
            return Err((StatusCode::UNAUTHORIZED, "No token provided"));
        }
    };

    // Verify JWT signature and decode claims
    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err((StatusCode::UNAUTHORIZED, "Invalid token"));
        }
    };

    // Make claims available to handlers
    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}
