//! SQLite station table loading.
//!
//! Expected columns: `id` (any type, optional), `name`, `lat`, `lon`, `price`.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::station::Station;

use super::csv_file::validate_station;

/// Table read when no other name is configured.
pub const DEFAULT_STATION_TABLE: &str = "fuel_stations";

/// Read every station row from `table`, ordered by rowid.
pub fn read_stations(path: &Path, table: &str) -> Result<Vec<Station>> {
    ensure_identifier(table)?;

    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    let sql = format!(
        "SELECT CAST(id AS TEXT), name, lat, lon, price FROM \"{table}\" ORDER BY rowid"
    );
    debug!(path = %path.display(), %sql, "querying station table");

    let mut statement = connection.prepare(&sql)?;
    let rows = statement.query_map([], station_from_row)?;

    let mut stations = Vec::new();
    for (idx, row) in rows.enumerate() {
        let station = row?;
        validate_station(&station, idx + 1)?;
        stations.push(station);
    }
    Ok(stations)
}

fn station_from_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    let id: Option<String> = row.get(0)?;
    let name: Option<String> = row.get(1)?;
    Ok(Station::new(
        id.filter(|v| !v.is_empty()),
        name.unwrap_or_default(),
        GeoPoint::new(row.get(2)?, row.get(3)?),
        row.get(4)?,
    ))
}

/// Table names are interpolated into SQL, so only plain identifiers pass.
fn ensure_identifier(table: &str) -> Result<()> {
    let mut chars = table.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(Error::InvalidTableName {
            name: table.to_string(),
        })
    }
}
