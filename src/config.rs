//! Configuration loader for the `weatherdesk` backend service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). Nothing else in the crate calls `env::var` for
//! service settings.
//!
use std::env;

use anyhow::{anyhow, Result};

/// Default Weatherstack "current conditions" endpoint.
pub const DEFAULT_WEATHERSTACK_API_URL: &str = "http://api.weatherstack.com/current";

/// Default front-end origin allowed by CORS.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Parse an optional numeric environment variable into `Option<$ty>`.
macro_rules! parse_env_opt {
    ($var_name:expr, $ty:ty) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Weatherstack access key.
    pub api_key: String,

    /// Weatherstack current-conditions endpoint.
    pub api_url: String,

    /// Front-end origin allowed to call the API cross-origin.
    pub cors_origin: String,

    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,

    /// Per-request timeout for provider calls; `None` waits indefinitely.
    pub provider_timeout_secs: Option<u64>,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WEATHERSTACK_API_KEY` – provider access key
///
/// Optional:
/// - `WEATHERSTACK_API_URL` – provider endpoint (default: Weatherstack `/current`)
/// - `CORS_ORIGIN` – allowed front-end origin (default: `http://localhost:3000`)
/// - `PORT` – listen port (default: 8000)
/// - `PROVIDER_TIMEOUT_SECS` – provider request timeout (default: none)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let api_key = require_env!("WEATHERSTACK_API_KEY");
    if api_key.trim().is_empty() {
        return Err(anyhow!("WEATHERSTACK_API_KEY must not be empty"));
    }

    let api_url = env::var("WEATHERSTACK_API_URL")
        .unwrap_or_else(|_| DEFAULT_WEATHERSTACK_API_URL.to_string());
    let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
    let port = parse_env_opt!("PORT", u16).unwrap_or(8000);
    let provider_timeout_secs = parse_env_opt!("PROVIDER_TIMEOUT_SECS", u64);

    Ok(Config {
        api_key,
        api_url,
        cors_origin,
        port,
        provider_timeout_secs,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// The access key is masked; everything else is shown as loaded.
    pub fn log_config(&self) {
        // ---
        let timeout = match self.provider_timeout_secs {
            Some(secs) => format!("{secs}s"),
            None => "none".to_string(),
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  WEATHERSTACK_API_KEY  : {}", mask_secret(&self.api_key));
        tracing::info!("  WEATHERSTACK_API_URL  : {}", self.api_url);
        tracing::info!("  CORS_ORIGIN           : {}", self.cors_origin);
        tracing::info!("  PORT                  : {}", self.port);
        tracing::info!("  PROVIDER_TIMEOUT_SECS : {}", timeout);
    }
}

/// Keep the last four characters of a secret and star out the rest.
fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
