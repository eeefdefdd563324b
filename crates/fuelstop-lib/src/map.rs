//! Static map preview URLs for planned routes.
//!
//! The URL targets an OpenStreetMap static map renderer: a green marker at the
//! route start, a red marker at the end, blue markers at each fuel stop and a
//! trail of gray markers sampled evenly along the route.

use std::fmt::Write;

use crate::geo::GeoPoint;
use crate::route::Route;
use crate::station::FuelStop;

/// Rendered image size requested from the map service.
pub const STATIC_MAP_SIZE: &str = "800x400";

/// Number of equal intervals used for the route trail (yields one more marker).
pub const ROUTE_TRAIL_INTERVALS: usize = 20;

const START_MARKER: &str = "lightgreen1";
const FINISH_MARKER: &str = "red1";
const STOP_MARKER: &str = "blue1";
const TRAIL_MARKER: &str = "gray1";

/// Build a static map URL showing the route and its fuel stops.
pub fn static_map_url(base_url: &str, route: &Route, stops: &[FuelStop]) -> String {
    let mut url = format!("{base_url}?size={STATIC_MAP_SIZE}");

    push_marker(&mut url, route.first(), START_MARKER);
    push_marker(&mut url, route.last(), FINISH_MARKER);
    for stop in stops {
        push_marker(&mut url, stop.station.location, STOP_MARKER);
    }

    let total = route.total_miles();
    for i in 0..=ROUTE_TRAIL_INTERVALS {
        let point = route.sample_at_distance(total * (i as f64 / ROUTE_TRAIL_INTERVALS as f64));
        push_marker(&mut url, point, TRAIL_MARKER);
    }

    url
}

fn push_marker(url: &mut String, point: GeoPoint, style: &str) {
    // Writing into a String cannot fail.
    let _ = write!(url, "&markers={},{},{}", point.lat, point.lon, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::Station;

    #[test]
    fn url_lists_endpoints_stops_and_trail() {
        let route = Route::from_points(vec![GeoPoint::new(30.0, -97.0), GeoPoint::new(31.0, -97.0)])
            .expect("route builds");
        let stops = vec![FuelStop {
            station: Station::new(None, "Midway", GeoPoint::new(30.5, -97.01), 3.0),
            checkpoint_miles: 34.0,
            distance_from_checkpoint_miles: 0.6,
        }];

        let url = static_map_url("https://maps.example/static", &route, &stops);

        assert!(url.starts_with("https://maps.example/static?size=800x400&markers=30,-97,lightgreen1"));
        assert!(url.contains("&markers=31,-97,red1"));
        assert!(url.contains("&markers=30.5,-97.01,blue1"));
        assert_eq!(url.matches(",gray1").count(), ROUTE_TRAIL_INTERVALS + 1);
        assert!(url.ends_with("&markers=31,-97,gray1"));
    }

    #[test]
    fn single_point_route_repeats_the_point() {
        let route = Route::from_points(vec![GeoPoint::new(1.5, 2.5)]).expect("route builds");
        let url = static_map_url("base", &route, &[]);
        assert_eq!(url.matches("&markers=1.5,2.5,").count(), 2 + ROUTE_TRAIL_INTERVALS + 1);
        assert!(!url.contains("blue1"));
    }
}
