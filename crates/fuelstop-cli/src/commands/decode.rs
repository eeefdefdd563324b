//! Decode command handler: prints the vertices of an encoded route.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use fuelstop_cli::output::{write_json, write_route_text, OutputFormat, RoutePoint};
use fuelstop_cli::terminal::ColorPalette;
use fuelstop_lib::Route;

use super::PolylineInput;

#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: PolylineInput,
}

/// Handle the decode subcommand.
pub fn handle_decode(args: &DecodeArgs, format: OutputFormat) -> Result<()> {
    let polyline = args.input.read()?;
    let route = Route::from_polyline(&polyline).context("failed to decode route polyline")?;
    let points = RoutePoint::from_route(&route);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &points)?,
        OutputFormat::Text => write_route_text(&mut out, &points, &ColorPalette::detect())?,
    }
    out.flush()?;
    Ok(())
}
