//! Data models for weather submissions and the Weatherstack wire format.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::ProviderError;

/// Stored when the provider omits a sunrise/sunset time.
pub const UNAVAILABLE: &str = "N/A";

// ---

/// Body of `POST /weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRequest {
    // ---
    pub date: String,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body returned by `POST /weather`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub id: Uuid,
}

/// One accepted submission, as stored and as served by `GET /weather/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    // ---
    pub id: Uuid,
    pub date: String,
    pub location: String,
    pub notes: String,
    pub weather: WeatherSnapshot,
    pub geo: GeoInfo,
}

/// Provider conditions captured at submission time.
///
/// Measurements keep the provider's number as sent (`10` stays `10`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    // ---
    pub temperature: Number,
    pub description: Vec<String>,
    pub humidity: Number,
    pub wind_speed: Number,
    pub uv_index: Number,
    pub icon: String,
    pub feelslike: Number,
    pub visibility: Number,
    pub sunrise: String,
    pub sunset: String,
    pub air_quality: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
}

/// `(normalized location, id)` pair; serializes as a two-element JSON array.
pub type HistoryEntry = (String, Uuid);

/// Trim surrounding whitespace and lowercase.
pub fn normalize_location(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Deduplication key for a normalized location and a raw date.
pub fn composite_key(normalized_location: &str, date: &str) -> String {
    format!("{normalized_location}_{date}")
}

impl WeatherRecord {
    // ---
    pub fn new(id: Uuid, request: &WeatherRequest, weather: WeatherSnapshot, geo: GeoInfo) -> Self {
        // ---
        WeatherRecord {
            id,
            date: request.date.clone(),
            location: normalize_location(&request.location),
            notes: request.notes.clone().unwrap_or_default(),
            weather,
            geo,
        }
    }

    /// Key under which this record is deduplicated.
    pub fn key(&self) -> String {
        composite_key(&self.location, &self.date)
    }
}

// --- Weatherstack wire format ---

/// Successful `/current` response. Error payloads lack `current` and are
/// rejected before this type is deserialized.
#[derive(Debug, Deserialize)]
pub struct CurrentConditionsResponse {
    // ---
    pub current: RawCurrent,
    pub location: RawLocation,
}

#[derive(Debug, Deserialize)]
pub struct RawCurrent {
    // ---
    pub temperature: Number,
    pub weather_descriptions: Vec<String>,
    pub humidity: Number,
    pub wind_speed: Number,
    pub uv_index: Number,
    pub weather_icons: Vec<String>,
    pub feelslike: Number,
    pub visibility: Number,
    #[serde(default)]
    pub astro: Option<RawAstro>,
    #[serde(default)]
    pub air_quality: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAstro {
    #[serde(default)]
    pub sunrise: Option<String>,
    #[serde(default)]
    pub sunset: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    // ---
    #[serde(deserialize_with = "de_coordinate")]
    pub lat: f64,
    #[serde(deserialize_with = "de_coordinate")]
    pub lon: f64,
    pub timezone_id: String,
}

/// Weatherstack sends coordinates as strings ("48.867"); accept numbers too.
fn de_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coordinate {
        Number(f64),
        Text(String),
    }

    match Coordinate::deserialize(deserializer)? {
        Coordinate::Number(n) => Ok(n),
        Coordinate::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

impl CurrentConditionsResponse {
    // ---
    /// Map the provider payload onto the stored snapshot and geo info.
    pub fn into_parts(self) -> Result<(WeatherSnapshot, GeoInfo), ProviderError> {
        // ---
        let current = self.current;
        let icon = current
            .weather_icons
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Schema("weather_icons is empty".to_string()))?;
        let astro = current.astro.unwrap_or_default();

        let weather = WeatherSnapshot {
            temperature: current.temperature,
            description: current.weather_descriptions,
            humidity: current.humidity,
            wind_speed: current.wind_speed,
            uv_index: current.uv_index,
            icon,
            feelslike: current.feelslike,
            visibility: current.visibility,
            sunrise: astro.sunrise.unwrap_or_else(|| UNAVAILABLE.to_string()),
            sunset: astro.sunset.unwrap_or_else(|| UNAVAILABLE.to_string()),
            air_quality: current.air_quality.unwrap_or_default(),
        };

        let geo = GeoInfo {
            lat: self.location.lat,
            lon: self.location.lon,
            timezone: self.location.timezone_id,
        };

        Ok((weather, geo))
    }
}
