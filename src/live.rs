//! Live feed adapter for the third-party air-quality provider.
//!
//! Produces a *candidate* pollutant set only; nothing here ever writes a
//! reading. Persisting live data goes through the normal create path.
//!
//! Resolution order for a place string:
//! 1. the city identifier -> city-wide feed endpoint
//! 2. a known ward        -> feed by the ward's coordinates
//! 3. anything else       -> feed by the raw place name (best effort)

use anyhow::Result;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::wards;

// ---

/// Candidate pollutant set as reported by the provider. Fields the provider
/// did not report stay `None`; the adapter never invents values.
#[derive(Debug, PartialEq, Serialize)]
pub struct LiveReading {
    pub station: Option<String>,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
}

/// Outcome of a provider query that completed at the transport level.
/// Transport/protocol failures surface as `Err` from [`fetch_live`] instead.
#[derive(Debug, PartialEq)]
pub enum LiveOutcome {
    Found(LiveReading),
    NotFound,
}

/// Which of the provider's feed endpoints a place string maps onto.
#[derive(Debug, PartialEq)]
pub enum FeedTarget {
    City,
    Geo { latitude: f64, longitude: f64 },
    Name(String),
}

// ---

/// Map a place string onto a feed endpoint.
pub fn resolve_target(place: &str) -> FeedTarget {
    // ---
    let place = place.trim();

    if place.eq_ignore_ascii_case(wards::CITY) {
        return FeedTarget::City;
    }

    if let Some(ward) = wards::find_by_name(place) {
        return FeedTarget::Geo {
            latitude: ward.latitude,
            longitude: ward.longitude,
        };
    }

    FeedTarget::Name(place.to_string())
}

fn feed_url(base: &str, target: &FeedTarget) -> Result<Url> {
    // ---
    let path = match target {
        FeedTarget::City => format!("feed/{}/", wards::CITY.to_lowercase()),
        FeedTarget::Geo {
            latitude,
            longitude,
        } => format!("feed/geo:{latitude};{longitude}/"),
        FeedTarget::Name(name) => format!("feed/{name}/"),
    };

    let url = format!("{}/{}", base.trim_end_matches('/'), path);
    Ok(Url::parse(&url)?)
}

/// Query the live provider for a place.
///
/// Returns `Ok(NotFound)` when the provider answers with a non-success
/// status, and `Err` for anything at the transport level (timeout, DNS,
/// malformed body). The client's request timeout bounds the call.
pub async fn fetch_live(http: &Client, config: &Config, place: &str) -> Result<LiveOutcome> {
    // ---
    let target = resolve_target(place);
    let url = feed_url(&config.feed_url, &target)?;

    debug!("live feed lookup for '{}' via {:?}", place, target);

    let body: Value = http
        .get(url)
        .query(&[("token", config.feed_token.as_str())])
        .send()
        .await?
        .json()
        .await?;

    debug!("live feed raw response: {}", body);

    Ok(normalize_feed(&body))
}

/// Turn the provider's envelope into the internal pollutant shape.
///
/// The provider reports per-pollutant values under `data.iaqi.<key>.v` and
/// the station under `data.city.name`. Any status other than `"ok"` means
/// the place has no data, which is not a failure.
pub fn normalize_feed(body: &Value) -> LiveOutcome {
    // ---
    if body.get("status").and_then(Value::as_str) != Some("ok") {
        return LiveOutcome::NotFound;
    }

    let data = &body["data"];
    let pollutant = |key: &str| data["iaqi"][key]["v"].as_f64();

    LiveOutcome::Found(LiveReading {
        station: data["city"]["name"].as_str().map(String::from),
        pm25: pollutant("pm25"),
        pm10: pollutant("pm10"),
        no2: pollutant("no2"),
        so2: pollutant("so2"),
    })
}
