// src/routes/health.rs
//! API health check endpoint for the weatherdesk backend.
//!
//! Used by container orchestrators and smoke tests to verify that the service
//! is up and answering HTTP requests. Follows the Explicit Module Boundary
//! Pattern (EMBP): the handler stays private, and the gateway (`mod.rs`) only
//! sees the subrouter.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Returns a static JSON object. Touches neither the store nor the weather
/// provider.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges cleanly with the gateway
/// router regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
