use axum::{extract::State, response::IntoResponse};
use axum_helpers::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// Readiness probe: pings MongoDB.
pub async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    let client = state.client.clone();

    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async move {
            if database::mongo::check_health(&client).await {
                Ok(())
            } else {
                Err("MongoDB ping failed".to_string())
            }
        }),
    )];

    match run_health_checks(checks).await {
        Ok(response) => response.into_response(),
        Err(response) => response.into_response(),
    }
}
