//! End-to-end fuel-stop planning for a single route.
//!
//! The pipeline decodes the route geometry, places refuel checkpoints,
//! selects a station per checkpoint and prices the trip. It performs no I/O:
//! the route and the station catalog arrive fully resolved.
//!
//! # Example
//!
//! ```
//! use fuelstop_lib::{plan_fuel_stops, GeoPoint, PlanRequest, PlannerConfig, Station};
//!
//! let request = PlanRequest::new("_p~iF~ps|U_ulLnnqC", 10.0, PlannerConfig::default());
//! let catalog = vec![Station::new(None, "Depot", GeoPoint::new(38.5, -120.2), 3.0)];
//! let plan = plan_fuel_stops(&request, &catalog).unwrap();
//! assert!(plan.fuel_stops.is_empty());
//! assert_eq!(plan.estimated_total_cost_usd, Some(3.0));
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::checkpoints::{locate_checkpoints, plan_checkpoints};
use crate::config::PlannerConfig;
use crate::cost::{estimate_cost, round_to_hundredths};
use crate::error::{Error, Result};
use crate::map::static_map_url;
use crate::route::Route;
use crate::station::{plan_stops, FuelStop, Station};

/// Inputs for one planning call, resolved by the routing collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// Route geometry in standard polyline encoding (1e-5 precision).
    pub encoded_polyline: String,
    /// Driving distance reported by the routing provider, in miles.
    pub total_route_distance_miles: f64,
    pub config: PlannerConfig,
}

impl PlanRequest {
    pub fn new(
        encoded_polyline: impl Into<String>,
        total_route_distance_miles: f64,
        config: PlannerConfig,
    ) -> Self {
        Self {
            encoded_polyline: encoded_polyline.into(),
            total_route_distance_miles,
            config,
        }
    }
}

/// Planned fuel stops and cost estimate for a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanResult {
    pub distance_miles: f64,
    pub estimated_total_gallons: f64,
    pub estimated_total_cost_usd: Option<f64>,
    pub fuel_stops: Vec<FuelStop>,
    pub map_image_url: String,
    /// The request polyline, unchanged.
    pub route_polyline: String,
}

/// Plan refuel stops along a route and estimate the fuel bill.
pub fn plan_fuel_stops(request: &PlanRequest, stations: &[Station]) -> Result<PlanResult> {
    let config = &request.config;
    config.validate()?;

    let distance = request.total_route_distance_miles;
    if !distance.is_finite() || distance < 0.0 {
        return Err(Error::invalid_input(format!(
            "total_route_distance_miles must be finite and non-negative, got {}",
            distance
        )));
    }

    let route = Route::from_polyline(&request.encoded_polyline)?;

    let distances = plan_checkpoints(distance, config.vehicle_range_miles)?;
    debug!(
        checkpoints = distances.len(),
        route_points = route.points().len(),
        "planned refuel checkpoints"
    );
    let checkpoints = locate_checkpoints(&route, &distances);

    let fuel_stops = plan_stops(&checkpoints, stations, config.search_radius_miles);
    let estimate = estimate_cost(distance, config.vehicle_mpg, &fuel_stops, stations)?;
    let map_image_url = static_map_url(&config.static_map_base_url, &route, &fuel_stops);

    info!(
        distance_miles = distance,
        checkpoints = checkpoints.len(),
        stops = fuel_stops.len(),
        catalog_size = stations.len(),
        gallons = estimate.total_gallons,
        cost_usd = ?estimate.estimated_cost_usd,
        "fuel plan computed"
    );

    Ok(PlanResult {
        distance_miles: round_to_hundredths(distance),
        estimated_total_gallons: round_to_hundredths(estimate.total_gallons),
        estimated_total_cost_usd: estimate.estimated_cost_usd,
        fuel_stops,
        map_image_url,
        route_polyline: request.encoded_polyline.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;

    #[test]
    fn invalid_config_is_rejected_before_decoding() {
        let config = PlannerConfig {
            vehicle_mpg: 0.0,
            ..PlannerConfig::default()
        };
        let request = PlanRequest::new("not a polyline", 100.0, config);
        let err = plan_fuel_stops(&request, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let request = PlanRequest::new("_p~iF~ps|U", -1.0, PlannerConfig::default());
        let err = plan_fuel_stops(&request, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn malformed_polyline_is_a_decode_error() {
        let request = PlanRequest::new("_p~iF", 100.0, PlannerConfig::default());
        let err = plan_fuel_stops(&request, &[]).unwrap_err();
        assert!(err.is_decode_error());
    }

    #[test]
    fn short_trip_with_empty_catalog_has_unknown_cost() {
        let request = PlanRequest::new("_p~iF~ps|U", 120.456, PlannerConfig::default());
        let plan = plan_fuel_stops(&request, &[]).unwrap();
        assert_eq!(plan.distance_miles, 120.46);
        assert_eq!(plan.estimated_total_gallons, 12.05);
        assert_eq!(plan.estimated_total_cost_usd, None);
        assert!(plan.fuel_stops.is_empty());
        assert_eq!(plan.route_polyline, "_p~iF~ps|U");
    }

    #[test]
    fn short_trip_prices_at_cheapest_station() {
        let catalog = vec![
            Station::new(None, "A", GeoPoint::new(0.0, 0.0), 3.4),
            Station::new(None, "B", GeoPoint::new(1.0, 1.0), 2.9),
        ];
        let request = PlanRequest::new("_p~iF~ps|U", 100.0, PlannerConfig::default());
        let plan = plan_fuel_stops(&request, &catalog).unwrap();
        assert!(plan.fuel_stops.is_empty());
        assert_eq!(plan.estimated_total_cost_usd, Some(29.0));
    }
}
