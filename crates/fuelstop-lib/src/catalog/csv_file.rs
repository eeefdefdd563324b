//! CSV station catalog parsing.
//!
//! Headers are matched case-insensitively against a list of synonyms so that
//! exports from different price feeds load without preprocessing.

use std::collections::BTreeMap;
use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::station::Station;

/// Canonical field name -> accepted header spellings (normalized).
const HEADER_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "id",
        &["id", "station_id", "external_id", "opis_truckstop_id", "truckstop_id"],
    ),
    ("name", &["name", "station_name", "truckstop_name"]),
    ("lat", &["lat", "latitude"]),
    ("lon", &["lon", "lng", "long", "longitude"]),
    (
        "price",
        &["price", "retail_price", "price_per_gallon", "price_usd"],
    ),
];

const REQUIRED_FIELDS: &[&str] = &["lat", "lon", "price"];

/// Normalize header strings for robust matching (case, spaces and
/// underscores are ignored).
fn normalize(s: &str) -> String {
    s.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Parse stations from CSV data, preserving row order.
pub fn read_stations<R: Read>(reader: R) -> Result<Vec<Station>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|err| Error::CatalogValidation {
            message: format!("failed to read station CSV headers: {err}"),
        })?
        .clone();

    let normalized_headers: Vec<String> = headers.iter().map(normalize).collect();

    let mut index_map: BTreeMap<&str, usize> = BTreeMap::new();
    for (canon, alts) in HEADER_SYNONYMS {
        if let Some(i) = alts.iter().find_map(|alt| {
            let alt_n = normalize(alt);
            normalized_headers.iter().position(|h| *h == alt_n)
        }) {
            index_map.insert(*canon, i);
        }
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !index_map.contains_key(field))
        .collect();
    if !missing.is_empty() {
        return Err(Error::CatalogValidation {
            message: format!(
                "station CSV missing required columns: {}. Available: {}",
                missing.join(", "),
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        });
    }

    let mut stations = Vec::new();
    // Header occupies line 1.
    for (idx, result) in csv_reader.records().enumerate() {
        let row = idx + 2;
        let record = result.map_err(|e| Error::CatalogValidation {
            message: format!("row {row}: {e}"),
        })?;

        let get = |field: &str| -> Option<String> {
            index_map
                .get(field)
                .and_then(|&i| record.get(i))
                .map(|s| s.trim().to_string())
        };

        let name = get("name").unwrap_or_default();
        let number = |field: &str| -> Result<f64> {
            let raw = get(field).filter(|v| !v.is_empty()).ok_or_else(|| {
                Error::CatalogValidation {
                    message: format!("missing {field} for station '{name}' at row {row}"),
                }
            })?;
            raw.parse::<f64>().map_err(|e| Error::CatalogValidation {
                message: format!("invalid {field} for station '{name}' at row {row}: {e}"),
            })
        };

        let lat = number("lat")?;
        let lon = number("lon")?;
        let price = number("price")?;
        let id = get("id").filter(|v| !v.is_empty());

        let station = Station::new(id, name.clone(), GeoPoint::new(lat, lon), price);
        validate_station(&station, row)?;
        stations.push(station);
    }

    Ok(stations)
}

/// Reject rows the planner cannot use.
pub(crate) fn validate_station(station: &Station, row: usize) -> Result<()> {
    if !station.location.lat.is_finite() || !station.location.lon.is_finite() {
        return Err(Error::CatalogValidation {
            message: format!(
                "station '{}' at row {} has non-finite coordinates",
                station.name, row
            ),
        });
    }
    if !station.price.is_finite() || station.price < 0.0 {
        return Err(Error::CatalogValidation {
            message: format!(
                "station '{}' at row {} has invalid price {}",
                station.name, row, station.price
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_canonical_headers_in_order() {
        let csv = "id,name,lat,lon,price\n7,Alpha,35.1,-97.2,3.19\n,Beta,36.0,-98.0,3.05\n";
        let stations = read_stations(Cursor::new(csv)).expect("parses");
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id.as_deref(), Some("7"));
        assert_eq!(stations[0].name, "Alpha");
        assert_eq!(stations[0].location, GeoPoint::new(35.1, -97.2));
        assert_eq!(stations[1].id, None);
        assert_eq!(stations[1].price, 3.05);
    }

    #[test]
    fn accepts_header_synonyms_and_padding() {
        let csv = "OPIS Truckstop ID, Truckstop Name , Latitude,Longitude,Retail Price\n\
                   42 , Big Rig Stop , 40.0 , -100.0 , 3.459\n";
        let stations = read_stations(Cursor::new(csv)).expect("synonyms parse");
        assert_eq!(stations[0].id.as_deref(), Some("42"));
        assert_eq!(stations[0].name, "Big Rig Stop");
        assert_eq!(stations[0].price, 3.459);
    }

    #[test]
    fn missing_columns_are_listed() {
        let csv = "name,lat,price\nAlpha,35.1,3.19\n";
        let err = read_stations(Cursor::new(csv)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing required columns: lon"), "{message}");
    }

    #[test]
    fn name_column_is_optional() {
        let csv = "id,lat,lon,price\n9,35.1,-97.2,3.19\n";
        let stations = read_stations(Cursor::new(csv)).expect("parses without names");
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "");
        assert_eq!(stations[0].id.as_deref(), Some("9"));
    }

    #[test]
    fn bad_numbers_report_row() {
        let csv = "name,lat,lon,price\nAlpha,35.1,-97.2,3.19\nBeta,north,-98.0,3.05\n";
        let err = read_stations(Cursor::new(csv)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid lat for station 'Beta' at row 3"), "{message}");
    }

    #[test]
    fn negative_price_is_rejected() {
        let csv = "name,lat,lon,price\nRefund,35.1,-97.2,-1.0\n";
        let err = read_stations(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }

    #[test]
    fn header_only_file_is_empty() {
        let stations = read_stations(Cursor::new("name,lat,lon,price\n")).expect("parses");
        assert!(stations.is_empty());
    }
}
