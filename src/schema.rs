//! Database schema management for `wardair`.
//!
//! Ensures the readings table and its indexes exist before serving requests.
//! Applied once on startup from `main.rs`.

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// Safe to call on every startup; no-op if objects already exist. Errors are
/// propagated if any SQL execution fails.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // Persisted readings served by /api/readings. `aqi` and `category` are
    // NOT NULL: the store gateway never inserts a reading without them.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS readings (
            id            UUID PRIMARY KEY,
            ward_number   INTEGER          NOT NULL,
            ward_name     TEXT             NOT NULL,
            pm25          DOUBLE PRECISION NOT NULL,
            pm10          DOUBLE PRECISION NOT NULL,
            no2           DOUBLE PRECISION NOT NULL,
            so2           DOUBLE PRECISION NOT NULL,
            aqi           INTEGER          NOT NULL,
            category      TEXT             NOT NULL,
            latitude      DOUBLE PRECISION NOT NULL,
            longitude     DOUBLE PRECISION NOT NULL,
            source        TEXT             NOT NULL,
            observed_date DATE             NOT NULL,
            created_at    TIMESTAMPTZ      NOT NULL
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Ward history queries group by name
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_readings_ward_name
            ON readings (ward_name);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Matches the list ordering (observed_date DESC, created_at DESC)
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_readings_observed
            ON readings (observed_date DESC, created_at DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
