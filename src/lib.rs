//! `weatherdesk`: records weather snapshots for submitted locations.
//!
//! The library target holds everything the binary serves, so the router can
//! be driven in-process from `tests/`. Modules follow the Explicit Module
//! Boundary Pattern (EMBP): siblings reach each other only through the
//! re-exports below, never through each other's paths.

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod routes;
pub mod store;

pub use config::Config;
pub use errors::AppError;
pub use models::{
    composite_key, normalize_location, CurrentConditionsResponse, GeoInfo, HistoryEntry,
    WeatherRecord, WeatherRequest, WeatherResponse, WeatherSnapshot,
};
pub use provider::{ProviderError, WeatherstackClient};
pub use store::WeatherStore;
