mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use fuelstop_cli::logging::{init_logging, LoggingConfig};
use fuelstop_cli::output::OutputFormat;

use commands::decode::{handle_decode, DecodeArgs};
use commands::plan::{handle_plan, PlanArgs};
use commands::stations::{handle_stations, StationsArgs};
use commands::CatalogOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan cheap fuel stops along a driving route")]
struct Cli {
    /// CSV station catalog (overrides FUELSTOP_STATIONS_CSV).
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// SQLite station database, read before the CSV catalog
    /// (overrides FUELSTOP_STATIONS_DB).
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan refuel stops and estimate the fuel cost for a route.
    Plan(PlanArgs),
    /// List stations in the catalog, optionally near a point.
    Stations(StationsArgs),
    /// Print the points of an encoded route polyline.
    Decode(DecodeArgs),
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let catalog = CatalogOptions {
        catalog: cli.catalog,
        database: cli.database,
    };

    match &cli.command {
        Command::Plan(args) => handle_plan(&catalog, args, cli.format),
        Command::Stations(args) => handle_stations(&catalog, args, cli.format),
        Command::Decode(args) => handle_decode(args, cli.format),
    }
}
