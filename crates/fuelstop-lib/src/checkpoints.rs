//! Refuel checkpoint placement along a route.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::route::Route;

/// Upper bound on refuel checkpoints for a single trip.
pub const MAX_CHECKPOINTS: usize = 100_000;

/// Position along the route where a refuel decision is made.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Checkpoint {
    /// Distance from the route start in miles.
    pub distance_miles: f64,
    /// Sampled point on the route at that distance.
    pub location: GeoPoint,
}

/// Distances from the start at which the vehicle must refuel.
///
/// A vehicle covering `vehicle_range_miles` per tank needs one fewer stop than
/// the number of tank-ranges the trip spans, so a trip within range yields no
/// checkpoints and checkpoint `k` sits at `min(total, k * range)`.
///
/// # Examples
/// ```
/// use fuelstop_lib::plan_checkpoints;
///
/// assert_eq!(plan_checkpoints(1500.0, 500.0).unwrap(), vec![500.0, 1000.0]);
/// assert!(plan_checkpoints(400.0, 500.0).unwrap().is_empty());
/// ```
pub fn plan_checkpoints(total_distance_miles: f64, vehicle_range_miles: f64) -> Result<Vec<f64>> {
    if !vehicle_range_miles.is_finite() || vehicle_range_miles <= 0.0 {
        return Err(Error::invalid_input(format!(
            "vehicle_range_miles must be finite and positive, got {}",
            vehicle_range_miles
        )));
    }
    if !total_distance_miles.is_finite() || total_distance_miles < 0.0 {
        return Err(Error::invalid_input(format!(
            "total_distance_miles must be finite and non-negative, got {}",
            total_distance_miles
        )));
    }

    if total_distance_miles <= vehicle_range_miles {
        return Ok(Vec::new());
    }

    let tanks = (total_distance_miles / vehicle_range_miles).ceil();
    if !tanks.is_finite() || tanks - 1.0 > MAX_CHECKPOINTS as f64 {
        return Err(Error::invalid_input(format!(
            "a {total_distance_miles} mile trip at {vehicle_range_miles} miles per tank \
             needs more than {MAX_CHECKPOINTS} refuel stops"
        )));
    }

    let stops = tanks as usize - 1;
    Ok((1..=stops)
        .map(|k| total_distance_miles.min(k as f64 * vehicle_range_miles))
        .collect())
}

/// Resolve checkpoint distances to points on the route.
pub fn locate_checkpoints(route: &Route, distances: &[f64]) -> Vec<Checkpoint> {
    distances
        .iter()
        .map(|&distance_miles| Checkpoint {
            distance_miles,
            location: route.sample_at_distance(distance_miles),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_range_needs_no_stop() {
        assert!(plan_checkpoints(400.0, 500.0).unwrap().is_empty());
        assert!(plan_checkpoints(500.0, 500.0).unwrap().is_empty());
        assert!(plan_checkpoints(0.0, 500.0).unwrap().is_empty());
    }

    #[test]
    fn exact_multiple_needs_one_fewer_stop() {
        assert_eq!(plan_checkpoints(1000.0, 500.0).unwrap(), vec![500.0]);
    }

    #[test]
    fn partial_tank_range_rounds_up() {
        assert_eq!(plan_checkpoints(790.0, 500.0).unwrap(), vec![500.0]);
        assert_eq!(plan_checkpoints(1500.0, 500.0).unwrap(), vec![500.0, 1000.0]);
        assert_eq!(
            plan_checkpoints(1501.0, 500.0).unwrap(),
            vec![500.0, 1000.0, 1500.0]
        );
    }

    #[test]
    fn non_positive_range_is_invalid() {
        for range in [0.0, -10.0, f64::NAN] {
            let err = plan_checkpoints(1000.0, range).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { .. }), "range {range}");
        }
    }

    #[test]
    fn tiny_range_is_rejected_instead_of_allocating() {
        for (total, range) in [(1.0, f64::MIN_POSITIVE), (1e12, 1.0)] {
            let err = plan_checkpoints(total, range).unwrap_err();
            assert!(matches!(err, Error::InvalidInput { .. }), "{total}/{range}");
            assert!(err.to_string().contains("refuel stops"));
        }
    }

    #[test]
    fn stop_count_at_the_limit_is_allowed() {
        let total = (MAX_CHECKPOINTS + 1) as f64;
        assert_eq!(plan_checkpoints(total, 1.0).unwrap().len(), MAX_CHECKPOINTS);
    }

    #[test]
    fn negative_distance_is_invalid() {
        let err = plan_checkpoints(-1.0, 500.0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn checkpoints_are_sampled_on_route() {
        let route = Route::from_points(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 2.0)])
            .expect("route builds");
        let half = route.total_miles() / 2.0;
        let located = locate_checkpoints(&route, &[half]);
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].distance_miles, half);
        assert!((located[0].location.lon - 1.0).abs() < 1e-9);
    }
}
