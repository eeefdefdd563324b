//! Fuel station values and per-checkpoint station selection.
//!
//! Selection is greedy and local to each checkpoint: the cheapest station
//! within the search radius wins, otherwise the cheapest station anywhere in
//! the catalog is used so a stop is still reported.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::checkpoints::Checkpoint;
use crate::geo::{great_circle_distance_miles, GeoPoint};

/// A fuel station as supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Opaque identity from the catalog source, when it has one.
    pub id: Option<String>,
    pub name: String,
    #[serde(flatten)]
    pub location: GeoPoint,
    /// Price per gallon in USD.
    pub price: f64,
}

impl Station {
    pub fn new(id: Option<String>, name: impl Into<String>, location: GeoPoint, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            location,
            price,
        }
    }
}

/// Station chosen for one checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStop {
    #[serde(flatten)]
    pub station: Station,
    /// Distance from the start of the checkpoint that selected this station.
    pub checkpoint_miles: f64,
    /// Great-circle distance between the checkpoint and the station.
    ///
    /// Exceeds the search radius when the catalog-wide fallback was used.
    pub distance_from_checkpoint_miles: f64,
}

/// Stations within `radius_miles` of `point`, nearest first.
///
/// Ties keep catalog order.
pub fn find_nearby<'a>(
    point: GeoPoint,
    stations: &'a [Station],
    radius_miles: f64,
) -> Vec<(&'a Station, f64)> {
    let mut nearby: Vec<(&Station, f64)> = stations
        .iter()
        .map(|station| (station, great_circle_distance_miles(point, station.location)))
        .filter(|(_, distance)| *distance <= radius_miles)
        .collect();
    nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
    nearby
}

/// Cheapest station in iteration order; the first one wins ties.
pub fn cheapest_station<'a, I>(stations: I) -> Option<&'a Station>
where
    I: IntoIterator<Item = &'a Station>,
{
    stations
        .into_iter()
        .min_by(|a, b| a.price.total_cmp(&b.price))
}

/// Pick the station to refuel at for a checkpoint.
///
/// Returns the cheapest station within the radius (nearest of equally cheap
/// ones), else the cheapest station in the whole catalog, else `None` when the
/// catalog is empty.
pub fn select_for_checkpoint(
    point: GeoPoint,
    stations: &[Station],
    radius_miles: f64,
) -> Option<&Station> {
    let nearby = find_nearby(point, stations, radius_miles);
    if !nearby.is_empty() {
        return cheapest_station(nearby.into_iter().map(|(station, _)| station));
    }

    let fallback = cheapest_station(stations);
    if let Some(station) = fallback {
        warn!(
            lat = point.lat,
            lon = point.lon,
            radius_miles,
            station = %station.name,
            "no station within search radius; using cheapest station in catalog"
        );
    }
    fallback
}

/// Select a station per checkpoint and drop repeated locations.
///
/// Checkpoints with no station are skipped. Stations whose coordinates round
/// to the same 5-decimal pair are reported once, at their first occurrence.
pub fn plan_stops(checkpoints: &[Checkpoint], stations: &[Station], radius_miles: f64) -> Vec<FuelStop> {
    let mut seen = HashSet::new();
    let mut stops = Vec::with_capacity(checkpoints.len());

    for checkpoint in checkpoints {
        let Some(station) = select_for_checkpoint(checkpoint.location, stations, radius_miles)
        else {
            continue;
        };

        if !seen.insert(station.location.rounded_key()) {
            debug!(
                checkpoint_miles = checkpoint.distance_miles,
                station = %station.name,
                "station already selected for an earlier checkpoint"
            );
            continue;
        }

        debug!(
            checkpoint_miles = checkpoint.distance_miles,
            station = %station.name,
            price = station.price,
            "selected fuel stop"
        );
        stops.push(FuelStop {
            station: station.clone(),
            checkpoint_miles: checkpoint.distance_miles,
            distance_from_checkpoint_miles: great_circle_distance_miles(
                checkpoint.location,
                station.location,
            ),
        });
    }

    stops
}
