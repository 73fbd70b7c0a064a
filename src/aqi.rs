//! AQI derivation: the worst pollutant dominates.

use crate::models::Category;

// ---

/// Compute the composite AQI and its severity category from the four
/// pollutant concentrations.
///
/// The index is simply the maximum of the concentrations, rounded to the
/// nearest integer. This is deliberately not a sub-index AQI formula; the
/// worst pollutant alone sets the score, and the category follows from the
/// fixed threshold table in [`category_of`].
///
/// Inputs are assumed non-negative; callers validate before invoking.
pub fn compute_aqi(pm25: f64, pm10: f64, no2: f64, so2: f64) -> (i32, Category) {
    // ---
    let aqi = pm25.max(pm10).max(no2).max(so2).round() as i32;
    (aqi, category_of(aqi))
}

/// Fixed category thresholds, evaluated in ascending order, first match wins.
///
/// Persisted readings keep the category computed at write time; this table
/// is only ever consulted on create.
pub fn category_of(aqi: i32) -> Category {
    // ---
    match aqi {
        i32::MIN..=50 => Category::Good,
        51..=100 => Category::Satisfactory,
        101..=200 => Category::Moderate,
        201..=300 => Category::Poor,
        301..=400 => Category::VeryPoor,
        _ => Category::Severe,
    }
}
