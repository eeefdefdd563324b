//! Route geometry: cumulative distances and positional sampling.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{great_circle_distance_miles, GeoPoint};
use crate::polyline::decode_polyline;

/// Decoded route with cumulative great-circle distance per vertex.
///
/// `points` and `cumulative_miles` always have the same non-zero length,
/// `cumulative_miles[0]` is zero and the sequence never decreases.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    points: Vec<GeoPoint>,
    cumulative_miles: Vec<f64>,
}

impl Route {
    /// Build a route from points in traversal order.
    pub fn from_points(points: Vec<GeoPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyRoute);
        }

        let mut cumulative_miles = Vec::with_capacity(points.len());
        cumulative_miles.push(0.0);
        for pair in points.windows(2) {
            let previous = cumulative_miles[cumulative_miles.len() - 1];
            cumulative_miles.push(previous + great_circle_distance_miles(pair[0], pair[1]));
        }

        Ok(Self {
            points,
            cumulative_miles,
        })
    }

    /// Decode an encoded polyline and build its route.
    pub fn from_polyline(encoded: &str) -> Result<Self> {
        let points = decode_polyline(encoded)?;
        debug!(points = points.len(), "decoded route polyline");
        Self::from_points(points)
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn cumulative_miles(&self) -> &[f64] {
        &self.cumulative_miles
    }

    /// Length of the polyline in miles.
    pub fn total_miles(&self) -> f64 {
        self.cumulative_miles[self.cumulative_miles.len() - 1]
    }

    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn last(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    /// Point lying `target_miles` along the route from its start.
    ///
    /// Targets at or before the start clamp to the first point and targets at
    /// or past the end clamp to the last point. Between vertices the latitude
    /// and longitude are interpolated linearly and independently. That is only
    /// an approximation of the geodesic, accurate while segments stay short,
    /// which holds for consecutive polyline vertices.
    pub fn sample_at_distance(&self, target_miles: f64) -> GeoPoint {
        if target_miles <= 0.0 {
            return self.first();
        }
        if target_miles >= self.total_miles() {
            return self.last();
        }

        for i in 1..self.cumulative_miles.len() {
            if self.cumulative_miles[i] >= target_miles {
                let prev = i - 1;
                let segment = self.cumulative_miles[i] - self.cumulative_miles[prev];
                if segment == 0.0 {
                    return self.points[i];
                }
                let frac = (target_miles - self.cumulative_miles[prev]) / segment;
                let from = self.points[prev];
                let to = self.points[i];
                return GeoPoint::new(
                    from.lat + (to.lat - from.lat) * frac,
                    from.lon + (to.lon - from.lon) * frac,
                );
            }
        }

        self.last()
    }
}
