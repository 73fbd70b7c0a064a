//! Data model for the ward air-quality pipeline.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

// ---

/// Severity bucket derived from an AQI value.
///
/// Variants are ordered from least to most severe; the wire and database
/// representation is the human-readable label ("Very Poor", not "VeryPoor").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    Severe,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Satisfactory => "Satisfactory",
            Category::Moderate => "Moderate",
            Category::Poor => "Poor",
            Category::VeryPoor => "Very Poor",
            Category::Severe => "Severe",
        }
    }

    fn parse(s: &str) -> Option<Category> {
        match s {
            "Good" => Some(Category::Good),
            "Satisfactory" => Some(Category::Satisfactory),
            "Moderate" => Some(Category::Moderate),
            "Poor" => Some(Category::Poor),
            "Very Poor" => Some(Category::VeryPoor),
            "Severe" => Some(Category::Severe),
            _ => None,
        }
    }
}

/// Provenance tag: was the reading typed in by an operator or pre-filled
/// from the live feed? Live-feed lookups never persist anything themselves,
/// so `live` only ever arrives through the normal create path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Manual,
    Live,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Manual => "manual",
            Source::Live => "live",
        }
    }

    fn parse(s: &str) -> Option<Source> {
        match s {
            "manual" => Some(Source::Manual),
            "live" => Some(Source::Live),
            _ => None,
        }
    }
}

// ---

/// Raw reading submission as it arrives from the client.
///
/// Pollutant fields are optional at the wire level so a missing value can be
/// reported as a validation error rather than a generic deserialize failure;
/// `so2` genuinely is optional and defaults to 0.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    pub ward_number: i32,
    pub ward_name: String,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub observed_date: NaiveDate,
    #[serde(default)]
    pub source: Source,
}

/// Candidate handed to the store gateway.
///
/// `aqi` and `category` are plain (non-optional) fields: a candidate cannot
/// be constructed without having gone through the calculator first, which is
/// how the gateway enforces its derived-fields invariant.
#[derive(Debug)]
pub struct NewReading {
    pub ward_number: i32,
    pub ward_name: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub aqi: i32,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub source: Source,
    pub observed_date: NaiveDate,
}

/// Persisted reading as served by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: Uuid,
    pub ward_number: i32,
    pub ward_name: String,
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub so2: f64,
    pub aqi: i32,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub source: Source,
    pub observed_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// Category and Source live as TEXT columns; decode them by hand so a bad
// value surfaces as a column decode error instead of a panic.
impl FromRow<'_, PgRow> for Reading {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let category: String = row.try_get("category")?;
        let category = Category::parse(&category).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "category".into(),
            source: format!("unknown category '{category}'").into(),
        })?;

        let source: String = row.try_get("source")?;
        let source = Source::parse(&source).ok_or_else(|| sqlx::Error::ColumnDecode {
            index: "source".into(),
            source: format!("unknown source '{source}'").into(),
        })?;

        Ok(Reading {
            id: row.try_get("id")?,
            ward_number: row.try_get("ward_number")?,
            ward_name: row.try_get("ward_name")?,
            pm25: row.try_get("pm25")?,
            pm10: row.try_get("pm10")?,
            no2: row.try_get("no2")?,
            so2: row.try_get("so2")?,
            aqi: row.try_get("aqi")?,
            category,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            source,
            observed_date: row.try_get("observed_date")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
