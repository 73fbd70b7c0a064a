//! End-to-end checks against a running wardair instance.
//!
//! Requires `BASE_URL` (default http://localhost:8080) and `ADMIN_TOKEN`
//! (default "test-admin-token") pointing at a live server with a reachable
//! database.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reading {
    id: String,
    ward_number: i32,
    ward_name: String,
    pm25: f64,
    pm10: f64,
    no2: f64,
    so2: f64,
    aqi: i32,
    category: String,
    latitude: f64,
    longitude: f64,
    source: String,
    observed_date: NaiveDate,
    created_at: DateTime<Utc>,
}

fn base_url() -> String {
    std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into())
}

fn admin_token() -> String {
    std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| "test-admin-token".into())
}

#[tokio::test]
async fn health_is_reachable() -> Result<()> {
    // ---
    let res = Client::new()
        .get(format!("{}/health", base_url()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn create_requires_token() -> Result<()> {
    // ---
    let res = Client::new()
        .post(format!("{}/api/readings", base_url()))
        .json(&json!({
            "wardNumber": 2,
            "wardName": "Rohini",
            "pm25": 90.0,
            "pm10": 60.0,
            "no2": 20.0,
            "observedDate": "2025-11-03"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn invalid_ward_is_rejected_without_persisting() -> Result<()> {
    // ---
    let client = Client::new();
    let base = base_url();

    // Ward number and name disagree: must be rejected as a whole.
    let res = client
        .post(format!("{base}/api/readings"))
        .header("token", admin_token())
        .json(&json!({
            "wardNumber": 1,
            "wardName": "Rohini",
            "pm25": 90.0,
            "pm10": 60.0,
            "no2": 20.0,
            "observedDate": "2025-11-03"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Nothing with the mismatched pair may exist in the store.
    let listed: Vec<Reading> = client
        .get(format!("{base}/api/readings"))
        .send()
        .await?
        .json()
        .await?;
    assert!(
        !listed
            .iter()
            .any(|r| r.ward_number == 1 && r.ward_name == "Rohini"),
        "rejected create must not persist"
    );

    Ok(())
}

#[tokio::test]
async fn missing_pollutant_is_a_validation_error() -> Result<()> {
    // ---
    let res = Client::new()
        .post(format!("{}/api/readings", base_url()))
        .header("token", admin_token())
        .json(&json!({
            "wardNumber": 2,
            "wardName": "Rohini",
            "pm25": 90.0,
            "no2": 20.0,
            "observedDate": "2025-11-03"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn severe_reading_lifecycle() -> Result<()> {
    // ---
    let client = Client::new();
    let base = base_url();
    let token = admin_token();

    // The Anand Vihar scenario: pm25 dominates, category lands in Very Poor.
    let created: Reading = client
        .post(format!("{base}/api/readings"))
        .header("token", &token)
        .json(&json!({
            "wardNumber": 1,
            "wardName": "Anand Vihar",
            "pm25": 350.0,
            "pm10": 60.0,
            "no2": 20.0,
            "observedDate": "2025-11-03"
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(created.aqi, 350);
    assert_eq!(created.category, "Very Poor");
    assert_eq!(created.so2, 0.0, "omitted so2 defaults to zero");
    assert_eq!(created.source, "manual");
    assert_eq!(created.ward_name, "Anand Vihar");
    assert!(created.created_at <= Utc::now());
    // Coordinates come from the ward table, not the request.
    assert!((created.latitude - 28.6469).abs() < 1e-6);
    assert!((created.longitude - 77.3161).abs() < 1e-6);

    // It shows up in the list, which is ordered by observedDate descending.
    let listed: Vec<Reading> = client
        .get(format!("{base}/api/readings"))
        .send()
        .await?
        .json()
        .await?;
    assert!(listed.iter().any(|r| r.id == created.id));
    for pair in listed.windows(2) {
        assert!(
            pair[0].observed_date >= pair[1].observed_date,
            "list must be ordered by observedDate descending"
        );
    }

    // Delete it, then confirm a second delete reports NotFound.
    let res = client
        .delete(format!("{base}/api/readings/{}", created.id))
        .header("token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{base}/api/readings/{}", created.id))
        .header("token", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn moderate_reading_derives_from_worst_pollutant() -> Result<()> {
    // ---
    let client = Client::new();
    let base = base_url();
    let token = admin_token();

    let created: Reading = client
        .post(format!("{base}/api/readings"))
        .header("token", &token)
        .json(&json!({
            "wardNumber": 2,
            "wardName": "Rohini",
            "pm25": 120.0,
            "pm10": 80.0,
            "no2": 40.0,
            "so2": 0.0,
            "observedDate": "2025-11-02",
            "source": "live"
        }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    assert_eq!(created.aqi, 120);
    assert_eq!(created.category, "Moderate");
    assert_eq!(created.source, "live");
    assert_eq!(created.ward_number, 2);
    assert_eq!(created.pm25, 120.0);
    assert_eq!(created.pm10, 80.0);
    assert_eq!(created.no2, 40.0);

    // Clean up.
    client
        .delete(format!("{base}/api/readings/{}", created.id))
        .header("token", &token)
        .send()
        .await?
        .error_for_status()?;

    Ok(())
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() -> Result<()> {
    // ---
    let res = Client::new()
        .delete(format!(
            "{}/api/readings/00000000-0000-4000-8000-000000000000",
            base_url()
        ))
        .header("token", admin_token())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
