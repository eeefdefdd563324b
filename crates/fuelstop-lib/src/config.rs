//! Planner configuration: vehicle characteristics and search settings.
//!
//! # Environment Variables
//!
//! - `FUELSTOP_VEHICLE_RANGE_MILES`: miles a full tank covers (default `500`)
//! - `FUELSTOP_VEHICLE_MPG`: fuel efficiency in miles per gallon (default `10`)
//! - `FUELSTOP_SEARCH_RADIUS_MILES`: station search radius around each
//!   checkpoint (default `25`)
//! - `FUELSTOP_STATIC_MAP_URL`: base URL of the static map renderer

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ENV_VEHICLE_RANGE_MILES: &str = "FUELSTOP_VEHICLE_RANGE_MILES";
pub const ENV_VEHICLE_MPG: &str = "FUELSTOP_VEHICLE_MPG";
pub const ENV_SEARCH_RADIUS_MILES: &str = "FUELSTOP_SEARCH_RADIUS_MILES";
pub const ENV_STATIC_MAP_URL: &str = "FUELSTOP_STATIC_MAP_URL";

pub const DEFAULT_VEHICLE_RANGE_MILES: f64 = 500.0;
pub const DEFAULT_VEHICLE_MPG: f64 = 10.0;
pub const DEFAULT_SEARCH_RADIUS_MILES: f64 = 25.0;
pub const DEFAULT_STATIC_MAP_URL: &str = "https://staticmap.openstreetmap.de/staticmap.php";

/// Settings applied to every plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub vehicle_range_miles: f64,
    pub vehicle_mpg: f64,
    pub search_radius_miles: f64,
    pub static_map_base_url: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicle_range_miles: DEFAULT_VEHICLE_RANGE_MILES,
            vehicle_mpg: DEFAULT_VEHICLE_MPG,
            search_radius_miles: DEFAULT_SEARCH_RADIUS_MILES,
            static_map_base_url: DEFAULT_STATIC_MAP_URL.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Validate that every numeric setting is finite and positive.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("vehicle_range_miles", self.vehicle_range_miles),
            ("vehicle_mpg", self.vehicle_mpg),
            ("search_radius_miles", self.search_radius_miles),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::invalid_input(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Read configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset or blank keys keep their defaults; values that fail to parse are
    /// reported rather than ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parse = |key: &str, raw: String| -> Result<f64> {
            raw.trim().parse::<f64>().map_err(|err| {
                Error::invalid_input(format!("{key} must be a number, got '{raw}': {err}"))
            })
        };

        if let Some(raw) = read(ENV_VEHICLE_RANGE_MILES) {
            config.vehicle_range_miles = parse(ENV_VEHICLE_RANGE_MILES, raw)?;
        }
        if let Some(raw) = read(ENV_VEHICLE_MPG) {
            config.vehicle_mpg = parse(ENV_VEHICLE_MPG, raw)?;
        }
        if let Some(raw) = read(ENV_SEARCH_RADIUS_MILES) {
            config.search_radius_miles = parse(ENV_SEARCH_RADIUS_MILES, raw)?;
        }
        if let Some(raw) = read(ENV_STATIC_MAP_URL) {
            config.static_map_base_url = raw.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }
}
