//! Router gateway: merges the per-endpoint subrouters, attaches shared state
//! and wraps everything in the CORS and request-tracing layers.

use anyhow::{anyhow, Result};
use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};

use crate::{WeatherStore, WeatherstackClient};

mod health;
mod history;
mod weather;

/// State shared by every handler.
pub type AppState = (WeatherStore, WeatherstackClient);

// ---

pub fn router(
    store: WeatherStore,
    provider: WeatherstackClient,
    cors_origin: &str,
) -> Result<Router> {
    // ---
    let app = Router::new()
        .merge(weather::router())
        .merge(history::router())
        .merge(health::router())
        .with_state((store, provider))
        .layer(cors_layer(cors_origin)?)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Allow one front-end origin with credentials.
///
/// Wildcards are not allowed alongside credentials, so headers and methods
/// are mirrored from the preflight request instead.
fn cors_layer(origin: &str) -> Result<CorsLayer> {
    // ---
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| anyhow!("Invalid CORS_ORIGIN '{}': {}", origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
