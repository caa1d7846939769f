//! Weather submission and lookup endpoints.
//!
//! `POST /weather` enriches a submission with current conditions and stores
//! it; `GET /weather/{id}` serves a stored record.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::AppState;
use crate::{normalize_location, AppError, WeatherRecord, WeatherRequest, WeatherResponse};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/weather", post(create_weather))
        .route("/weather/{id}", get(get_weather))
}

/// `POST /weather`: enrich a submission with current conditions and store it.
async fn create_weather(
    State((store, provider)): State<AppState>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<WeatherResponse>, AppError> {
    // ---
    let id = Uuid::new_v4();
    let location = normalize_location(&request.location);
    info!("POST /weather - {} on {} ({})", location, request.date, id);

    // Step 1: Ask the provider, using the location as the caller typed it
    let (weather, geo) = provider.fetch_current(&request.location).await?;

    // Step 2: Dedup and store in one step
    let record = WeatherRecord::new(id, &request, weather, geo);
    store.insert(record)?;

    debug!("POST /weather - stored {}", id);
    Ok(Json(WeatherResponse { id }))
}

/// `GET /weather/{id}`: the stored record, or 404.
async fn get_weather(
    State((store, _)): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WeatherRecord>, AppError> {
    // ---
    // Ids that are not UUIDs cannot have been issued.
    let id = Uuid::parse_str(&id).map_err(|_| AppError::NotFound)?;

    store.get(&id).map(Json).ok_or_else(|| {
        debug!("GET /weather/{} - not found", id);
        AppError::NotFound
    })
}
