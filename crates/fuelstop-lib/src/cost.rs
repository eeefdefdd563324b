//! Trip fuel and cost estimation.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::station::{cheapest_station, FuelStop, Station};

/// Fuel volume and price estimate for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    /// Gallons needed for the whole trip (unrounded).
    pub total_gallons: f64,
    /// Estimated spend in USD rounded to cents, `None` without any price data.
    pub estimated_cost_usd: Option<f64>,
}

/// Estimate gallons and cost for a trip.
///
/// The total fuel is split equally across the chosen stops and each share is
/// bought at that stop's price. Tank capacity and per-leg consumption are not
/// modelled. Without stops the whole volume is priced at the cheapest catalog
/// station; with an empty catalog the cost is unknown.
pub fn estimate_cost(
    total_distance_miles: f64,
    miles_per_gallon: f64,
    stops: &[FuelStop],
    catalog: &[Station],
) -> Result<CostEstimate> {
    if !miles_per_gallon.is_finite() || miles_per_gallon <= 0.0 {
        return Err(Error::invalid_input(format!(
            "miles_per_gallon must be finite and positive, got {}",
            miles_per_gallon
        )));
    }

    let total_gallons = total_distance_miles / miles_per_gallon;

    let estimated_cost_usd = if !stops.is_empty() {
        let gallons_per_stop = total_gallons / stops.len() as f64;
        let total: f64 = stops
            .iter()
            .map(|stop| gallons_per_stop * stop.station.price)
            .sum();
        Some(round_to_cents(total))
    } else {
        cheapest_station(catalog).map(|station| round_to_cents(total_gallons * station.price))
    };

    Ok(CostEstimate {
        total_gallons,
        estimated_cost_usd,
    })
}

/// Round a monetary amount to whole cents.
pub fn round_to_cents(amount: f64) -> f64 {
    round_to_hundredths(amount)
}

/// Round to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
