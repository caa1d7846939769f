//! Request-scoped error kinds for the weather API.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! each kind onto a status code and a `{"detail": ...}` JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ProviderError;

// ---

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    // ---
    /// Provider could not resolve the location, or could not be reached.
    #[error("Not a real city or location not found")]
    ProviderLookup,

    /// Same normalized location and date were already recorded.
    #[error("This city has already been submitted for that date.")]
    DuplicateSubmission,

    #[error("Weather data not found")]
    NotFound,

    /// Anything else; the message of the underlying error becomes the detail.
    #[error("{0}")]
    Unexpected(#[from] anyhow::Error),
}

impl AppError {
    // ---
    pub fn status(&self) -> StatusCode {
        // ---
        match self {
            AppError::ProviderLookup | AppError::DuplicateSubmission => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        // ---
        match err {
            ProviderError::LocationNotFound(reason) => {
                tracing::warn!("Provider lookup failed: {}", reason);
                AppError::ProviderLookup
            }
            ProviderError::Schema(_) => AppError::Unexpected(anyhow::Error::new(err)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use axum::body::to_bytes;

    async fn body_detail(err: AppError) -> (StatusCode, String) {
        // ---
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, value["detail"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_client_errors_map_to_bad_request() {
        // ---
        let (status, detail) = body_detail(AppError::ProviderLookup).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail, "Not a real city or location not found");

        let (status, detail) = body_detail(AppError::DuplicateSubmission).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail, "This city has already been submitted for that date.");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        // ---
        let (status, detail) = body_detail(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(detail, "Weather data not found");
    }

    #[tokio::test]
    async fn test_unexpected_surfaces_cause_as_detail() {
        // ---
        let err = AppError::from(anyhow::anyhow!("something broke"));
        let (status, detail) = body_detail(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "something broke");
    }

    #[test]
    fn test_provider_errors_convert_by_kind() {
        // ---
        let lookup: AppError = ProviderError::LocationNotFound("status 404".into()).into();
        assert!(matches!(lookup, AppError::ProviderLookup));

        let schema: AppError = ProviderError::Schema("missing field `humidity`".into()).into();
        assert_eq!(schema.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(schema.to_string().contains("humidity"));
    }
}
