//! Shared fixture helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use fuelstop_lib::{PlannerConfig, StationCatalog};
use rusqlite::Connection;

/// Path to fixtures directory used by tests (station catalog, route polyline).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

#[allow(dead_code)]
pub fn stations_csv_path() -> PathBuf {
    fixtures_dir().join("stations.csv")
}

/// Load the five-station fixture catalog.
#[allow(dead_code)]
pub fn fixture_catalog() -> StationCatalog {
    StationCatalog::from_csv_path(&stations_csv_path()).expect("load fixture stations.csv")
}

/// Encoded route along latitude 35.0, roughly 1018.76 miles long.
#[allow(dead_code)]
pub fn fixture_polyline() -> String {
    fs::read_to_string(fixtures_dir().join("route_i40.polyline"))
        .expect("read fixture route")
        .trim()
        .to_string()
}

/// Config matching the worked example: 500-mile range, 25 mpg, 25-mile radius.
#[allow(dead_code)]
pub fn long_haul_config() -> PlannerConfig {
    PlannerConfig {
        vehicle_range_miles: 500.0,
        vehicle_mpg: 25.0,
        search_radius_miles: 25.0,
        ..PlannerConfig::default()
    }
}

/// Copy the CSV fixture into a SQLite database at `dir/stations.db`.
#[allow(dead_code)]
pub fn fixture_database(dir: &Path, table: &str) -> PathBuf {
    let path = dir.join("stations.db");
    let conn = Connection::open(&path).expect("create fixture db");
    conn.execute_batch(&format!(
        "CREATE TABLE {table} (id INTEGER PRIMARY KEY, name TEXT NOT NULL, lat REAL, lon REAL, price REAL);"
    ))
    .expect("create table");

    for station in fixture_catalog().stations() {
        conn.execute(
            &format!("INSERT INTO {table} (id, name, lat, lon, price) VALUES (?1, ?2, ?3, ?4, ?5)"),
            rusqlite::params![
                station
                    .id
                    .as_deref()
                    .map(|id| id.parse::<i64>().expect("numeric fixture id")),
                station.name,
                station.location.lat,
                station.location.lon,
                station.price,
            ],
        )
        .expect("insert station");
    }
    path
}
