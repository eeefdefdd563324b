//! Station catalog loading, kept apart from the planning core.
//!
//! This module is organized into focused submodules:
//!
//! - [`csv_file`] - CSV parsing with tolerant header matching
//! - [`sqlite`] - SQLite table loading
//! - [`cache`] - Time-bounded, copy-on-write catalog cache
//!
//! Every source normalizes its rows into [`Station`] values so the planner
//! never needs to know where its catalog came from.

pub mod cache;
pub mod csv_file;
pub mod sqlite;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::station::{cheapest_station, find_nearby, Station};

pub use cache::CatalogCache;
pub use sqlite::DEFAULT_STATION_TABLE;

/// File name used for the default CSV catalog location.
pub const DEFAULT_CATALOG_FILE: &str = "fuel_stations.csv";

/// Ordered, read-only collection of stations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationCatalog {
    stations: Vec<Station>,
    source: Option<PathBuf>,
}

impl StationCatalog {
    /// Wrap stations already normalized by the caller.
    pub fn new(stations: Vec<Station>) -> Self {
        Self {
            stations,
            source: None,
        }
    }

    /// Load a catalog from a CSV file.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| Error::CatalogOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_csv_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from CSV data (e.g. a file or in-memory buffer).
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(Self::new(csv_file::read_stations(reader)?))
    }

    /// Load a catalog from the default table of a SQLite database.
    pub fn from_sqlite_path(path: &Path) -> Result<Self> {
        Self::from_sqlite_table(path, DEFAULT_STATION_TABLE)
    }

    /// Load a catalog from a named table of a SQLite database.
    pub fn from_sqlite_table(path: &Path, table: &str) -> Result<Self> {
        let mut catalog = Self::new(sqlite::read_stations(path, table)?);
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Cheapest station, first in catalog order on ties.
    pub fn cheapest(&self) -> Option<&Station> {
        cheapest_station(&self.stations)
    }

    /// Stations within `radius_miles` of `point`, nearest first.
    pub fn nearby(&self, point: GeoPoint, radius_miles: f64) -> Vec<(&Station, f64)> {
        find_nearby(point, &self.stations, radius_miles)
    }

    /// Stations ordered by price, catalog order on ties.
    pub fn by_price(&self) -> Vec<&Station> {
        let mut sorted: Vec<&Station> = self.stations.iter().collect();
        sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
        sorted
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Provider of a station catalog.
pub trait StationSource: Send + Sync {
    /// Load the current catalog.
    fn load(&self) -> Result<StationCatalog>;

    /// Short human-readable description used in logs and errors.
    fn describe(&self) -> String;
}

/// CSV catalog file. A missing file yields an empty catalog.
#[derive(Debug, Clone)]
pub struct CsvStationSource {
    path: PathBuf,
}

impl CsvStationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StationSource for CsvStationSource {
    fn load(&self) -> Result<StationCatalog> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "station CSV not found; using empty catalog");
            return Ok(StationCatalog::default());
        }
        let catalog = StationCatalog::from_csv_path(&self.path)?;
        info!(path = %self.path.display(), stations = catalog.len(), "loaded station CSV");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// SQLite station table. A missing database file yields an empty catalog.
#[derive(Debug, Clone)]
pub struct SqliteStationSource {
    path: PathBuf,
    table: String,
}

impl SqliteStationSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: DEFAULT_STATION_TABLE.to_string(),
        }
    }

    /// Read from a different table than [`DEFAULT_STATION_TABLE`].
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }
}

impl StationSource for SqliteStationSource {
    fn load(&self) -> Result<StationCatalog> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "station database not found; using empty catalog");
            return Ok(StationCatalog::default());
        }
        let catalog = StationCatalog::from_sqlite_table(&self.path, &self.table)?;
        info!(
            path = %self.path.display(),
            table = %self.table,
            stations = catalog.len(),
            "loaded station table"
        );
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}#{}", self.path.display(), self.table)
    }
}

/// Tries the primary source and falls back when it has no stations.
pub struct FallbackStationSource {
    primary: Box<dyn StationSource>,
    fallback: Box<dyn StationSource>,
}

impl FallbackStationSource {
    pub fn new(primary: Box<dyn StationSource>, fallback: Box<dyn StationSource>) -> Self {
        Self { primary, fallback }
    }
}

impl StationSource for FallbackStationSource {
    fn load(&self) -> Result<StationCatalog> {
        let primary = self.primary.load()?;
        if !primary.is_empty() {
            return Ok(primary);
        }
        info!(
            primary = %self.primary.describe(),
            fallback = %self.fallback.describe(),
            "primary station source is empty; loading fallback"
        );
        self.fallback.load()
    }

    fn describe(&self) -> String {
        format!("{} -> {}", self.primary.describe(), self.fallback.describe())
    }
}

/// Default location of the CSV catalog under the platform data directory.
pub fn default_catalog_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "fuelstop", "fuelstop").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DEFAULT_CATALOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedSource {
        stations: Vec<Station>,
        loads: Arc<AtomicUsize>,
    }

    impl StationSource for FixedSource {
        fn load(&self) -> Result<StationCatalog> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(StationCatalog::new(self.stations.clone()))
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    fn fixed(stations: Vec<Station>) -> (Box<dyn StationSource>, Arc<AtomicUsize>) {
        let loads = Arc::new(AtomicUsize::new(0));
        (
            Box::new(FixedSource {
                stations,
                loads: Arc::clone(&loads),
            }),
            loads,
        )
    }

    fn station(name: &str, price: f64) -> Station {
        Station::new(None, name, GeoPoint::new(0.0, 0.0), price)
    }

    #[test]
    fn fallback_skips_secondary_when_primary_has_rows() {
        let (primary, _) = fixed(vec![station("Db", 3.0)]);
        let (secondary, secondary_loads) = fixed(vec![station("Csv", 2.0)]);
        let source = FallbackStationSource::new(primary, secondary);

        let catalog = source.load().expect("loads");
        assert_eq!(catalog.stations()[0].name, "Db");
        assert_eq!(secondary_loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn fallback_used_when_primary_is_empty() {
        let (primary, _) = fixed(Vec::new());
        let (secondary, _) = fixed(vec![station("Csv", 2.0)]);
        let source = FallbackStationSource::new(primary, secondary);

        let catalog = source.load().expect("loads");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.stations()[0].name, "Csv");
        assert_eq!(source.describe(), "fixed -> fixed");
    }

    #[test]
    fn missing_files_yield_empty_catalogs() {
        let dir = tempfile::tempdir().expect("temp dir");
        let csv = CsvStationSource::new(dir.path().join("absent.csv"));
        let db = SqliteStationSource::new(dir.path().join("absent.db"));
        assert!(csv.load().expect("csv loads").is_empty());
        assert!(db.load().expect("db loads").is_empty());
    }

    #[test]
    fn by_price_is_stable() {
        let catalog = StationCatalog::new(vec![
            station("Mid", 3.0),
            station("Low", 2.0),
            station("AlsoMid", 3.0),
        ]);
        let names: Vec<&str> = catalog.by_price().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Low", "Mid", "AlsoMid"]);
        assert_eq!(catalog.cheapest().map(|s| s.name.as_str()), Some("Low"));
    }
}
