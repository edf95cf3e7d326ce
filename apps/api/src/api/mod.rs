use axum::Router;

pub mod auth;
pub mod categories;
pub mod customers;
pub mod health;
pub mod products;
pub mod suppliers;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix is added by the `create_router` helper.
///
/// Takes a reference to AppState and initializes all services.
/// Returns a stateless Router (all sub-routers have state already applied);
/// only cheap Arc clones remain when domains extract their handles.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/categories", categories::router(state))
        .nest("/suppliers", suppliers::router(state))
        .nest("/customers", customers::router(state))
        .nest("/auth", auth::router(state))
}

/// Creates a router with the /ready endpoint that performs actual health
/// checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint pings MongoDB.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
