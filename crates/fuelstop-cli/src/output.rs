//! Output formatting for plans, station listings and decoded routes.
//!
//! Text output is meant for people; JSON output mirrors the library types and
//! is stable for scripting.

use std::io::{self, Write};

use clap::ValueEnum;
use fuelstop_lib::{PlanResult, Route, Station};
use serde::Serialize;

use crate::terminal::{format_usd, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Station listing entry; `distance_miles` is set for proximity searches.
#[derive(Debug, Clone, Serialize)]
pub struct StationRow<'a> {
    #[serde(flatten)]
    pub station: &'a Station,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// One decoded route vertex with its distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoutePoint {
    pub index: usize,
    pub lat: f64,
    pub lon: f64,
    pub cumulative_miles: f64,
}

impl RoutePoint {
    pub fn from_route(route: &Route) -> Vec<Self> {
        route
            .points()
            .iter()
            .zip(route.cumulative_miles())
            .enumerate()
            .map(|(index, (point, &cumulative_miles))| Self {
                index,
                lat: point.lat,
                lon: point.lon,
                cumulative_miles,
            })
            .collect()
    }
}

/// Write any serializable value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}

/// Render a fuel plan for humans.
///
/// Stops further than `search_radius_miles` from their checkpoint came from
/// the catalog-wide fallback and are flagged.
pub fn write_plan_text<W: Write>(
    out: &mut W,
    plan: &PlanResult,
    search_radius_miles: f64,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    writeln!(
        out,
        "{}Fuel plan for {:.2} miles{}",
        p.white_bold, plan.distance_miles, p.reset
    )?;
    writeln!(out, "  Estimated fuel: {:.2} gal", plan.estimated_total_gallons)?;
    match plan.estimated_total_cost_usd {
        Some(cost) => writeln!(
            out,
            "  Estimated cost: {}{}{}",
            p.green,
            format_usd(cost),
            p.reset
        )?,
        None => writeln!(
            out,
            "  Estimated cost: {}unknown (station catalog is empty){}",
            p.orange, p.reset
        )?,
    }

    if plan.fuel_stops.is_empty() {
        writeln!(out, "\nNo fuel stops needed.")?;
    } else {
        writeln!(out, "\nFuel stops ({}):", plan.fuel_stops.len())?;
        for (i, stop) in plan.fuel_stops.iter().enumerate() {
            let station = &stop.station;
            let id = station
                .id
                .as_deref()
                .map(|id| format!(" [{id}]"))
                .unwrap_or_default();
            writeln!(
                out,
                "{}{:>3}.{} {}{}{}{} at mile {:.1}: {}{}/gal{}",
                p.blue,
                i + 1,
                p.reset,
                p.white_bold,
                station.name,
                p.reset,
                id,
                stop.checkpoint_miles,
                p.green,
                format_price(station.price),
                p.reset
            )?;
            writeln!(
                out,
                "     {}({:.5}, {:.5}), {:.2} mi from checkpoint{}",
                p.gray,
                station.location.lat,
                station.location.lon,
                stop.distance_from_checkpoint_miles,
                p.reset
            )?;
            if stop.distance_from_checkpoint_miles > search_radius_miles {
                writeln!(
                    out,
                    "     {}no station within {:.1} mi; cheapest in catalog used{}",
                    p.orange, search_radius_miles, p.reset
                )?;
            }
        }
    }

    writeln!(out, "\nMap: {}{}{}", p.gray, plan.map_image_url, p.reset)
}

/// Render a station table.
pub fn write_stations_text<W: Write>(
    out: &mut W,
    rows: &[StationRow<'_>],
    palette: &ColorPalette,
) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No stations found.");
    }

    let with_distance = rows.iter().any(|row| row.distance_miles.is_some());
    writeln!(out, "Stations ({}):", rows.len())?;
    write!(
        out,
        "{}{:<28} {:>10} {:>10} {:>11}",
        palette.white_bold, "Name", "Price/gal", "Latitude", "Longitude"
    )?;
    if with_distance {
        write!(out, " {:>10}", "Miles")?;
    }
    writeln!(out, "{}", palette.reset)?;

    for row in rows {
        let station = row.station;
        write!(
            out,
            "{:<28} {:>10} {:>10.5} {:>11.5}",
            station.name,
            format_price(station.price),
            station.location.lat,
            station.location.lon
        )?;
        if let Some(distance) = row.distance_miles {
            write!(out, " {:>10.2}", distance)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Render decoded route vertices.
pub fn write_route_text<W: Write>(
    out: &mut W,
    points: &[RoutePoint],
    palette: &ColorPalette,
) -> io::Result<()> {
    let total = points.last().map(|p| p.cumulative_miles).unwrap_or(0.0);
    writeln!(
        out,
        "{}Decoded {} points ({:.2} miles){}",
        palette.white_bold,
        points.len(),
        total,
        palette.reset
    )?;
    for point in points {
        writeln!(
            out,
            "{:>5}  {:>10.5} {:>11.5}  {}{:>9.2} mi{}",
            point.index, point.lat, point.lon, palette.gray, point.cumulative_miles, palette.reset
        )?;
    }
    Ok(())
}

fn format_price(price: f64) -> String {
    format!("${:.3}", price)
}
