//! Fuel-stop planner library entry points.
//!
//! This crate decodes a driving route, places refuel checkpoints according to
//! the vehicle's range, picks the cheapest station near each checkpoint and
//! estimates the fuel bill. Station catalogs are loaded by the adapters in
//! [`catalog`] and handed to the planner as plain slices. Higher-level
//! consumers (the CLI) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod checkpoints;
pub mod config;
pub mod cost;
pub mod error;
pub mod geo;
pub mod map;
pub mod planner;
pub mod polyline;
pub mod route;
pub mod station;

pub use catalog::{
    default_catalog_path, CatalogCache, CsvStationSource, FallbackStationSource,
    SqliteStationSource, StationCatalog, StationSource,
};
pub use checkpoints::{locate_checkpoints, plan_checkpoints, Checkpoint};
pub use config::PlannerConfig;
pub use cost::{estimate_cost, round_to_cents, CostEstimate};
pub use error::{Error, Result};
pub use geo::{great_circle_distance_miles, miles_from_meters, GeoPoint};
pub use map::static_map_url;
pub use planner::{plan_fuel_stops, PlanRequest, PlanResult};
pub use polyline::{decode_polyline, encode_polyline};
pub use route::Route;
pub use station::{
    cheapest_station, find_nearby, plan_stops, select_for_checkpoint, FuelStop, Station,
};
