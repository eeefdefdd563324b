mod common;

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use common::{fixture_catalog, fixture_database, stations_csv_path};
use fuelstop_lib::catalog::DEFAULT_STATION_TABLE;
use fuelstop_lib::{
    default_catalog_path, CatalogCache, CsvStationSource, Error, FallbackStationSource, GeoPoint,
    SqliteStationSource, StationCatalog, StationSource,
};

#[test]
fn csv_fixture_loads_in_file_order() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.source_path(), Some(stations_csv_path().as_path()));

    let names: Vec<&str> = catalog.stations().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Desert Oasis",
            "Midway Fuel",
            "Interstate Plaza",
            "Eastbound Travel Center",
            "Prairie Stop"
        ]
    );
    assert_eq!(catalog.cheapest().map(|s| s.name.as_str()), Some("Desert Oasis"));
}

#[test]
fn nearby_orders_by_distance() {
    let catalog = fixture_catalog();
    let nearby = catalog.nearby(GeoPoint::new(35.0, -91.16), 25.0);
    let names: Vec<&str> = nearby.iter().map(|(s, _)| s.name.as_str()).collect();
    assert_eq!(names, vec!["Midway Fuel", "Interstate Plaza"]);
    assert!(nearby[0].1 < nearby[1].1);
}

#[test]
fn sqlite_copy_matches_csv_fixture() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db = fixture_database(dir.path(), DEFAULT_STATION_TABLE);

    let from_db = StationCatalog::from_sqlite_path(&db).expect("db loads");
    let from_csv = fixture_catalog();
    assert_eq!(from_db.stations(), from_csv.stations());
    assert_eq!(from_db.source_path(), Some(db.as_path()));
}

#[test]
fn fallback_prefers_database_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db = fixture_database(dir.path(), "truck_stops");

    let source = FallbackStationSource::new(
        Box::new(SqliteStationSource::new(&db).with_table("truck_stops")),
        Box::new(CsvStationSource::new(dir.path().join("missing.csv"))),
    );
    let catalog = source.load().expect("loads");
    assert_eq!(catalog.len(), 5);
    assert!(source.describe().contains("truck_stops"));
}

#[test]
fn fallback_reads_csv_when_database_is_missing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = FallbackStationSource::new(
        Box::new(SqliteStationSource::new(dir.path().join("absent.db"))),
        Box::new(CsvStationSource::new(stations_csv_path())),
    );
    let catalog = source.load().expect("loads");
    assert_eq!(catalog.len(), 5);
}

#[test]
fn malformed_csv_surfaces_validation_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bad.csv");
    fs::write(&path, "name,lat,lon,price\nBroken,35.0,,3.10\n").expect("write csv");

    let err = CsvStationSource::new(&path).load().unwrap_err();
    assert!(matches!(err, Error::CatalogValidation { .. }));
    assert!(err.to_string().contains("missing lon for station 'Broken' at row 2"));
}

#[test]
fn unreadable_csv_path_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = StationCatalog::from_csv_path(&dir.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, Error::CatalogOpen { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn cache_picks_up_file_changes_after_refresh() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("stations.csv");
    fs::write(&path, "name,lat,lon,price\nFirst,35.0,-91.2,3.00\n").expect("write csv");

    let cache = CatalogCache::with_ttl(CsvStationSource::new(&path), Duration::from_secs(3600));
    let before = cache.get().expect("initial load");
    assert_eq!(before.stations()[0].name, "First");

    fs::write(&path, "name,lat,lon,price\nSecond,35.0,-91.2,2.90\n").expect("rewrite csv");
    let cached = cache.get().expect("still cached");
    assert!(Arc::ptr_eq(&before, &cached));

    let after = cache.refresh().expect("reloads");
    assert_eq!(after.stations()[0].name, "Second");
    assert_eq!(before.stations()[0].name, "First");
}

#[test]
fn cache_keeps_serving_after_file_turns_invalid() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("stations.csv");
    fs::write(&path, "name,lat,lon,price\nFirst,35.0,-91.2,3.00\n").expect("write csv");

    let cache = CatalogCache::with_ttl(CsvStationSource::new(&path), Duration::ZERO);
    let first = cache.get().expect("initial load");

    fs::write(&path, "name,lat\nBroken,35.0\n").expect("corrupt csv");
    let served = cache.get().expect("previous catalog served");
    assert!(Arc::ptr_eq(&first, &served));
}

#[test]
fn default_catalog_path_points_at_csv() {
    // Some sandboxes have no home directory; only check the shape when resolved.
    if let Ok(path) = default_catalog_path() {
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("fuel_stations.csv")
        );
    }
}
