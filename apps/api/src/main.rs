use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use media::LocalFileStorage;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    // Connect to MongoDB with retry/backoff for transient startup failures
    let client = database::mongo::connect_from_config_with_retry(&config.mongo, None)
        .await
        .map_err(|e| eyre::eyre!("MongoDB connection failed: {}", e))?;
    let db = client.database(config.mongo.database());

    // Initialize indexes (idempotent)
    domain_products::MongoProductRepository::new(&db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Index initialization failed: {}", e))?;

    // File storage for uploaded product images
    let storage = Arc::new(LocalFileStorage::from_config(&config.storage));

    // Stateless JWT authentication for customer sessions
    let jwt_auth = axum_helpers::JwtAuth::new(&config.jwt);

    // Initialize the application state
    let state = AppState {
        config,
        client,
        db,
        storage,
        jwt_auth,
    };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check with an actual MongoDB ping
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting storefront API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown and cleanup.
    // State moves into the cleanup future.
    let server_config = state.config.server.clone();
    create_production_app(
        app,
        &server_config,
        Duration::from_secs(30), // 30s graceful shutdown timeout
        async move {
            info!("Shutting down: closing MongoDB connection");
            // The client closes its pool when the last handle drops
            drop(state);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Storefront API shutdown complete");
    Ok(())
}
