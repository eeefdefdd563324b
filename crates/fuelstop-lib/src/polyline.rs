//! Encoded polyline decoding and encoding.
//!
//! Implements the standard polyline algorithm used by routing providers:
//! coordinates are scaled by 1e5, delta-encoded against the previous point,
//! zig-zag folded to unsigned values and emitted as 5-bit chunks offset by 63,
//! with bit 0x20 marking continuation.

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

/// Coordinate scale factor (1e-5 degree precision).
pub const POLYLINE_PRECISION: f64 = 1e5;

/// Offset added to every 5-bit chunk to land in printable ASCII.
const CHUNK_OFFSET: u8 = 63;

/// Continuation flag within a chunk.
const CONTINUATION_BIT: u64 = 0x20;

/// Payload mask within a chunk.
const CHUNK_MASK: u64 = 0x1f;

/// Maximum chunks a single 32-bit value may occupy.
const MAX_CHUNKS: u32 = 7;

/// Sequential reader over the bytes of an encoded polyline.
struct ChunkReader<'a> {
    encoded: &'a str,
    offset: usize,
}

impl<'a> ChunkReader<'a> {
    fn new(encoded: &'a str) -> Self {
        Self { encoded, offset: 0 }
    }

    fn is_empty(&self) -> bool {
        self.offset >= self.encoded.len()
    }

    /// Read one zig-zag encoded signed value.
    fn read_value(&mut self) -> Result<i64> {
        let start = self.offset;
        let bytes = self.encoded.as_bytes();
        let mut result: u64 = 0;
        let mut chunks: u32 = 0;

        loop {
            let Some(&byte) = bytes.get(self.offset) else {
                return Err(Error::PolylineTruncated { offset: start });
            };
            if !(CHUNK_OFFSET..=b'~').contains(&byte) {
                let character = self.encoded[self.offset..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(Error::PolylineInvalidCharacter {
                    offset: self.offset,
                    character,
                });
            }
            if chunks == MAX_CHUNKS {
                return Err(Error::PolylineOverflow { offset: start });
            }

            let chunk = u64::from(byte - CHUNK_OFFSET);
            result |= (chunk & CHUNK_MASK) << (5 * chunks);
            chunks += 1;
            self.offset += 1;

            if chunk & CONTINUATION_BIT == 0 {
                break;
            }
        }

        if result > u64::from(u32::MAX) {
            return Err(Error::PolylineOverflow { offset: start });
        }

        let magnitude = (result >> 1) as i64;
        Ok(if result & 1 == 1 { !magnitude } else { magnitude })
    }
}

/// Decode an encoded polyline into points in traversal order.
///
/// An empty string decodes to an empty sequence.
///
/// # Examples
/// ```
/// use fuelstop_lib::polyline::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert_eq!(points[0].lat, 38.5);
/// assert_eq!(points[2].lon, -126.453);
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<GeoPoint>> {
    let mut reader = ChunkReader::new(encoded);
    let mut points = Vec::with_capacity(encoded.len() / 6);
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while !reader.is_empty() {
        lat += reader.read_value()?;
        if reader.is_empty() {
            return Err(Error::PolylineMissingLongitude {
                offset: reader.offset,
            });
        }
        lon += reader.read_value()?;

        points.push(GeoPoint::new(
            lat as f64 / POLYLINE_PRECISION,
            lon as f64 / POLYLINE_PRECISION,
        ));
    }

    Ok(points)
}

/// Encode points with the standard polyline algorithm.
pub fn encode_polyline(points: &[GeoPoint]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for point in points {
        let lat = (point.lat * POLYLINE_PRECISION).round() as i64;
        let lon = (point.lon * POLYLINE_PRECISION).round() as i64;
        write_value(&mut encoded, lat - prev_lat);
        write_value(&mut encoded, lon - prev_lon);
        prev_lat = lat;
        prev_lon = lon;
    }

    encoded
}

fn write_value(out: &mut String, value: i64) {
    let mut folded = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };

    while folded >= CONTINUATION_BIT {
        let chunk = (CONTINUATION_BIT | (folded & CHUNK_MASK)) as u8 + CHUNK_OFFSET;
        out.push(chunk as char);
        folded >>= 5;
    }
    out.push((folded as u8 + CHUNK_OFFSET) as char);
}
