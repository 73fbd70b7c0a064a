//! Reading store gateway.
//!
//! The consistency boundary in front of PostgreSQL: create, ordered list,
//! and delete-by-id. The gateway owns two rules the storage layer does not:
//! pollutant values must be finite and non-negative, and a reading is never
//! persisted without its derived `aqi`/`category` (enforced by the
//! [`NewReading`] type, which cannot be built without them). Concurrency
//! control is delegated to PostgreSQL's per-statement atomicity.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{NewReading, Reading};

// ---

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            StoreError::Db(e) => ApiError::Internal(e.into()),
        }
    }
}

/// Result of a delete: the row either existed or it did not. A missing id
/// is reported, not silently absorbed.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Missing,
}

// ---

/// Persist a new reading, assigning its id and creation timestamp.
pub async fn create_reading(pool: &PgPool, new: NewReading) -> Result<Reading, StoreError> {
    // ---
    validate_pollutants(&[
        ("pm25", new.pm25),
        ("pm10", new.pm10),
        ("no2", new.no2),
        ("so2", new.so2),
    ])?;

    let reading = Reading {
        id: Uuid::new_v4(),
        ward_number: new.ward_number,
        ward_name: new.ward_name,
        pm25: new.pm25,
        pm10: new.pm10,
        no2: new.no2,
        so2: new.so2,
        aqi: new.aqi,
        category: new.category,
        latitude: new.latitude,
        longitude: new.longitude,
        source: new.source,
        observed_date: new.observed_date,
        created_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO readings (
            id, ward_number, ward_name,
            pm25, pm10, no2, so2,
            aqi, category, latitude, longitude,
            source, observed_date, created_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        "#,
    )
    .bind(reading.id)
    .bind(reading.ward_number)
    .bind(&reading.ward_name)
    .bind(reading.pm25)
    .bind(reading.pm10)
    .bind(reading.no2)
    .bind(reading.so2)
    .bind(reading.aqi)
    .bind(reading.category.as_str())
    .bind(reading.latitude)
    .bind(reading.longitude)
    .bind(reading.source.as_str())
    .bind(reading.observed_date)
    .bind(reading.created_at)
    .execute(pool)
    .await?;

    Ok(reading)
}

/// All readings, most recent measurement first. No pagination here.
pub async fn list_readings(pool: &PgPool) -> Result<Vec<Reading>, StoreError> {
    // ---
    let readings = sqlx::query_as::<_, Reading>(
        r#"
        SELECT id, ward_number, ward_name,
               pm25, pm10, no2, so2,
               aqi, category, latitude, longitude,
               source, observed_date, created_at
        FROM readings
        ORDER BY observed_date DESC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(readings)
}

/// Permanently remove a reading. No soft-delete, no tombstone.
pub async fn delete_reading(pool: &PgPool, id: Uuid) -> Result<DeleteOutcome, StoreError> {
    // ---
    let result = sqlx::query("DELETE FROM readings WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        Ok(DeleteOutcome::Missing)
    } else {
        Ok(DeleteOutcome::Deleted)
    }
}

fn validate_pollutants(fields: &[(&str, f64)]) -> Result<(), StoreError> {
    // ---
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(StoreError::Validation(format!(
                "pollutant {name} is not a number"
            )));
        }
        if *value < 0.0 {
            return Err(StoreError::Validation(format!(
                "pollutant {name} must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}
