//! Geographic primitives shared by the planning stages.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula, in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Number of metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Latitude/longitude pair in decimal degrees.
///
/// Values are not range-checked; out-of-range inputs simply yield meaningless
/// distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to another point in miles.
    pub fn distance_to(&self, other: &Self) -> f64 {
        great_circle_distance_miles(*self, *other)
    }

    /// Coordinates rounded to 5 decimal places (about 1.1 m), as integers.
    ///
    /// Two points with the same key are treated as the same physical location.
    pub fn rounded_key(&self) -> (i64, i64) {
        (fixed_5dp(self.lat), fixed_5dp(self.lon))
    }
}

/// Decimal rounding of the exact binary value to 5 places, ties to even,
/// returned as an integer count of 1e-5 units.
fn fixed_5dp(value: f64) -> i64 {
    format!("{value:.5}")
        .replace('.', "")
        .parse()
        .unwrap_or_default()
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// Haversine distance between two points in miles.
pub fn great_circle_distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

/// Convert a distance reported in metres (as routing providers do) to miles.
pub fn miles_from_meters(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}
