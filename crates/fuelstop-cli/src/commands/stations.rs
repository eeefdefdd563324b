//! Stations command handler for browsing the resolved catalog.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use fuelstop_cli::output::{write_json, write_stations_text, OutputFormat, StationRow};
use fuelstop_cli::terminal::ColorPalette;
use fuelstop_lib::{GeoPoint, PlannerConfig, StationCatalog};

#[derive(Args, Debug, Clone)]
pub struct StationsArgs {
    /// Only list stations near this point, given as LAT,LON.
    #[arg(long, value_name = "LAT,LON", value_parser = parse_lat_lon, allow_hyphen_values = true)]
    pub near: Option<GeoPoint>,

    /// Search radius used with --near, in miles (defaults to
    /// FUELSTOP_SEARCH_RADIUS_MILES).
    #[arg(long = "radius-miles")]
    pub radius_miles: Option<f64>,

    /// Maximum number of stations to print.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Select the rows to display: nearest first for a proximity search,
/// otherwise the whole catalog cheapest first.
pub fn select_rows<'a>(
    catalog: &'a StationCatalog,
    args: &StationsArgs,
    radius_miles: f64,
) -> Vec<StationRow<'a>> {
    let rows: Vec<StationRow<'a>> = match args.near {
        Some(point) => catalog
            .nearby(point, radius_miles)
            .into_iter()
            .map(|(station, distance)| StationRow {
                station,
                distance_miles: Some(distance),
            })
            .collect(),
        None => catalog
            .by_price()
            .into_iter()
            .map(|station| StationRow {
                station,
                distance_miles: None,
            })
            .collect(),
    };

    match args.limit {
        Some(limit) => rows.into_iter().take(limit).collect(),
        None => rows,
    }
}

/// Handle the stations subcommand.
pub fn handle_stations(
    catalog: &super::CatalogOptions,
    args: &StationsArgs,
    format: OutputFormat,
) -> Result<()> {
    let radius_miles = match args.radius_miles {
        Some(radius) => radius,
        None => {
            PlannerConfig::from_env()
                .context("invalid planner settings in environment")?
                .search_radius_miles
        }
    };
    if !radius_miles.is_finite() || radius_miles < 0.0 {
        bail!("--radius-miles must be a non-negative number");
    }

    let stations = catalog.load()?;
    let rows = select_rows(&stations, args, radius_miles);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &rows)?,
        OutputFormat::Text => write_stations_text(&mut out, &rows, &ColorPalette::detect())?,
    }
    out.flush()?;
    Ok(())
}

fn parse_lat_lon(raw: &str) -> std::result::Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{raw}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;
    Ok(GeoPoint::new(lat, lon))
}
