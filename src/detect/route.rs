//! Route coordinate detection
//!
//! Finds `Origin: (lat, lon), Destination: (lat, lon)` in free text so the UI
//! can draw the trip on a map next to the reply.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const NUMBER: &str = r"(-?\d+(?:\.\d+)?)";

static ROUTE: Lazy<Regex> = Lazy::new(|| {
    let pair = format!(r"\(\s*{NUMBER}\s*,\s*{NUMBER}\s*\)");
    Regex::new(&format!(r"Origin:\s*{pair}\s*,?\s*Destination:\s*{pair}"))
        .expect("route pattern is valid")
});

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub latitude: f64,
    pub longitude: f64,
}

/// Origin and destination of a planned route; always both or neither
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteCoordinates {
    pub origin: LatLon,
    pub destination: LatLon,
}

/// Parse the first origin/destination template in `text`
pub fn detect_route(text: &str) -> Option<RouteCoordinates> {
    let caps = ROUTE.captures(text)?;
    let coord = |idx: usize| caps[idx].parse::<f64>().ok();

    Some(RouteCoordinates {
        origin: LatLon {
            latitude: coord(1)?,
            longitude: coord(2)?,
        },
        destination: LatLon {
            latitude: coord(3)?,
            longitude: coord(4)?,
        },
    })
}
