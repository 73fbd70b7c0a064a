//! Reading endpoints: ordered list, ingestion, and delete.
//!
//! Ingestion is the pipeline described in the module docs of `store` and
//! `alert`: resolve the ward, derive AQI/category, persist, then fire the
//! alert without holding the response open on it. Mutating endpoints are
//! gated by the `token` header; the list is public.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::models::{NewReading, RawReading, Reading};
use crate::store::{self, DeleteOutcome};
use crate::{alert, aqi, auth, wards};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/api/readings", get(list).post(create))
        .route("/api/readings/{id}", delete(remove))
}

/// GET /api/readings — every reading, most recent measurement first.
async fn list(State(state): State<AppState>) -> Result<Json<Vec<Reading>>, ApiError> {
    // ---
    let readings = store::list_readings(&state.pool).await?;
    debug!("listing {} readings", readings.len());
    Ok(Json(readings))
}

/// POST /api/readings — ingest one reading.
async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(raw): Json<RawReading>,
) -> Result<Json<Reading>, ApiError> {
    // ---
    auth::authorize(&headers, &state.config.admin_token)?;

    info!(
        "POST /api/readings - ward {} '{}'",
        raw.ward_number, raw.ward_name
    );

    // Step 1: resolve the ward against the reference table. Nothing is
    // computed or persisted for an unknown or mismatched ward.
    let ward = wards::resolve(raw.ward_number, &raw.ward_name).ok_or_else(|| {
        ApiError::InvalidWard(format!("{} / {}", raw.ward_number, raw.ward_name))
    })?;

    // Step 2: derive AQI and category from the submitted pollutants.
    let pm25 = required(raw.pm25, "pm25")?;
    let pm10 = required(raw.pm10, "pm10")?;
    let no2 = required(raw.no2, "no2")?;
    let so2 = raw.so2.unwrap_or(0.0);

    let (aqi_value, category) = aqi::compute_aqi(pm25, pm10, no2, so2);
    debug!("derived aqi={} category={:?}", aqi_value, category);

    // Step 3: persist through the store gateway.
    let reading = store::create_reading(
        &state.pool,
        NewReading {
            ward_number: ward.number,
            ward_name: ward.name.to_string(),
            pm25,
            pm10,
            no2,
            so2,
            aqi: aqi_value,
            category,
            latitude: ward.latitude,
            longitude: ward.longitude,
            source: raw.source,
            observed_date: raw.observed_date,
        },
    )
    .await?;

    // Step 4: alert only after a successful write, and never wait on it.
    alert::dispatch_if_severe(
        state.notifier.clone(),
        state.config.alert_recipient.clone(),
        &reading.ward_name,
        reading.aqi,
    );

    Ok(Json(reading))
}

/// DELETE /api/readings/{id} — permanently remove one reading.
async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    // ---
    auth::authorize(&headers, &state.config.admin_token)?;

    match store::delete_reading(&state.pool, id).await? {
        DeleteOutcome::Deleted => {
            info!("deleted reading {}", id);
            Ok(Json(json!({ "deleted": id })))
        }
        DeleteOutcome::Missing => Err(ApiError::NotFound(format!("reading {id}"))),
    }
}

fn required(value: Option<f64>, field: &str) -> Result<f64, ApiError> {
    // ---
    value.ok_or_else(|| ApiError::Validation(format!("missing pollutant field: {field}")))
}
