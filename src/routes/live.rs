//! Live feed lookup endpoint.
//!
//! Returns a candidate pollutant set for a place; nothing is persisted here.
//! The UI submits the candidate back through POST /api/readings (tagged
//! `source = live`) if the operator accepts it.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::warn;

use super::AppState;
use crate::error::ApiError;
use crate::live::{self, LiveOutcome, LiveReading};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/api/live/{place}", get(handler))
}

/// GET /api/live/{place} — query the provider, no auth required.
async fn handler(
    State(state): State<AppState>,
    Path(place): Path<String>,
) -> Result<Json<LiveReading>, ApiError> {
    // ---
    match live::fetch_live(&state.http, &state.config, &place).await {
        Ok(LiveOutcome::Found(reading)) => Ok(Json(reading)),
        Ok(LiveOutcome::NotFound) => {
            Err(ApiError::NotFound(format!("no live data for '{place}'")))
        }
        Err(e) => {
            // Degrade, don't crash: the caller sees 502 "unavailable".
            warn!("live feed lookup for '{}' failed: {:#}", place, e);
            Err(ApiError::Provider(e.to_string()))
        }
    }
}
