//! API error taxonomy and its HTTP response mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the [`IntoResponse`] impl is
//! the single place status codes and the `{"error": ...}` body shape are
//! decided. Alert delivery failures are deliberately absent from this
//! taxonomy: alerting is advisory and its errors never reach the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

// ---

#[derive(Debug, Error)]
pub enum ApiError {
    /// Ward number/name did not resolve (or did not agree) in the reference
    /// table. Rejected before any computation or persistence.
    #[error("invalid ward: {0}")]
    InvalidWard(String),

    /// Pollutant values missing or out of range. Rejected before persistence.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Caller lacks a valid credential for a mutating operation.
    #[error("unauthorized")]
    Unauthorized,

    /// Delete target absent, or the live feed has no data for the place.
    #[error("not found: {0}")]
    NotFound(String),

    /// The live-feed call failed (network, timeout, malformed response).
    /// Surfaced as a degraded "unavailable" result, never a crash.
    #[error("live data unavailable: {0}")]
    Provider(String),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidWard(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal(e) = &self {
            tracing::error!("internal error: {e:#}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
