//! Plan command handler.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use fuelstop_cli::output::{write_json, write_plan_text, OutputFormat};
use fuelstop_cli::terminal::ColorPalette;
use fuelstop_lib::{miles_from_meters, plan_fuel_stops, PlanRequest, PlannerConfig, Route};

use super::{CatalogOptions, PolylineInput};

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub input: PolylineInput,

    /// Driving distance in miles (defaults to the decoded route length).
    #[arg(long = "distance-miles", conflicts_with = "distance_meters")]
    pub distance_miles: Option<f64>,

    /// Driving distance in meters, as reported by routing providers.
    #[arg(long = "distance-meters")]
    pub distance_meters: Option<f64>,

    /// Miles the vehicle covers on one tank.
    #[arg(long = "range-miles")]
    pub range_miles: Option<f64>,

    /// Vehicle fuel economy in miles per gallon.
    #[arg(long)]
    pub mpg: Option<f64>,

    /// How far from a checkpoint to look for stations, in miles.
    #[arg(long = "radius-miles")]
    pub radius_miles: Option<f64>,
}

impl PlanArgs {
    /// Environment config with command-line overrides applied.
    fn config(&self) -> Result<PlannerConfig> {
        let mut config =
            PlannerConfig::from_env().context("invalid planner settings in environment")?;
        if let Some(range) = self.range_miles {
            config.vehicle_range_miles = range;
        }
        if let Some(mpg) = self.mpg {
            config.vehicle_mpg = mpg;
        }
        if let Some(radius) = self.radius_miles {
            config.search_radius_miles = radius;
        }
        Ok(config)
    }
}

/// Handle the plan subcommand.
pub fn handle_plan(catalog: &CatalogOptions, args: &PlanArgs, format: OutputFormat) -> Result<()> {
    let polyline = args.input.read()?;
    let config = args.config()?;

    let distance_miles = match (args.distance_miles, args.distance_meters) {
        (Some(miles), _) => miles,
        (None, Some(meters)) => miles_from_meters(meters),
        (None, None) => Route::from_polyline(&polyline)
            .context("failed to decode route polyline")?
            .total_miles(),
    };

    let stations = catalog.load()?;
    let search_radius = config.search_radius_miles;
    let request = PlanRequest::new(polyline, distance_miles, config);
    let plan = plan_fuel_stops(&request, stations.stations()).context("failed to plan fuel stops")?;
    info!(stops = plan.fuel_stops.len(), "plan ready");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &plan)?,
        OutputFormat::Text => write_plan_text(&mut out, &plan, search_radius, &ColorPalette::detect())?,
    }
    out.flush()?;
    Ok(())
}
