// Subcommand handlers.
//
// Each module handles one CLI subcommand; main.rs parses arguments and
// dispatches here. Shared helpers for catalog and polyline input live below.

pub mod decode;
pub mod plan;
pub mod stations;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use fuelstop_lib::{
    default_catalog_path, CsvStationSource, FallbackStationSource, SqliteStationSource,
    StationCatalog, StationSource,
};

/// Environment variable naming the CSV station catalog.
pub const ENV_STATIONS_CSV: &str = "FUELSTOP_STATIONS_CSV";
/// Environment variable naming the SQLite station database.
pub const ENV_STATIONS_DB: &str = "FUELSTOP_STATIONS_DB";

/// Catalog locations given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub catalog: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

impl CatalogOptions {
    /// Build the station source for these options.
    ///
    /// The CSV path comes from `--catalog`, then `FUELSTOP_STATIONS_CSV`, then
    /// the platform data directory. When a database is given through
    /// `--database` or `FUELSTOP_STATIONS_DB` it is read first and the CSV is
    /// only consulted if the database has no stations.
    pub fn station_source(&self) -> Result<Box<dyn StationSource>> {
        let csv_path = match self.catalog.clone().or_else(|| env_path(ENV_STATIONS_CSV)) {
            Some(path) => path,
            None => default_catalog_path()
                .context("no station catalog given; pass --catalog or set FUELSTOP_STATIONS_CSV")?,
        };
        let csv: Box<dyn StationSource> = Box::new(CsvStationSource::new(csv_path));

        let source: Box<dyn StationSource> =
            match self.database.clone().or_else(|| env_path(ENV_STATIONS_DB)) {
                Some(db_path) => Box::new(FallbackStationSource::new(
                    Box::new(SqliteStationSource::new(db_path)),
                    csv,
                )),
                None => csv,
            };
        debug!(source = %source.describe(), "resolved station source");
        Ok(source)
    }

    /// Load the catalog from the resolved source.
    pub fn load(&self) -> Result<StationCatalog> {
        let source = self.station_source()?;
        source
            .load()
            .with_context(|| format!("failed to load station catalog from {}", source.describe()))
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Route geometry given inline or through a file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct PolylineInput {
    /// Encoded route polyline (1e-5 precision).
    #[arg(long)]
    pub polyline: Option<String>,
    /// File containing the encoded route polyline.
    #[arg(long = "polyline-file", value_name = "PATH")]
    pub polyline_file: Option<PathBuf>,
}

impl PolylineInput {
    /// The encoded polyline with surrounding whitespace removed.
    pub fn read(&self) -> Result<String> {
        match (&self.polyline, &self.polyline_file) {
            (Some(inline), _) => Ok(inline.trim().to_string()),
            (None, Some(path)) => read_polyline_file(path),
            (None, None) => anyhow::bail!("either --polyline or --polyline-file is required"),
        }
    }
}

fn read_polyline_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read polyline from {}", path.display()))?;
    Ok(contents.trim().to_string())
}
