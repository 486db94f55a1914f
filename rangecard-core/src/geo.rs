//! Geodesic Calculations
//!
//! Great-circle distance and initial bearing between geographic
//! positions on a spherical Earth. These feed every firing solution:
//! the shooter-to-target distance drives the elevation hold and the
//! azimuth drives the wind resolution.

use serde::{Deserialize, Serialize};

use crate::error::TargetingError;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// 8-point compass names, one per 45 degree sector
const CARDINAL_NAMES: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude, -90..90
    pub lat: f64,
    /// Longitude, -180..180
    pub lon: f64,
}

impl Position {
    /// Create a position, validating the coordinate ranges
    ///
    /// Latitude must be within -90..90 and longitude within -180..180,
    /// both finite. The geodesic functions assume valid coordinates;
    /// this constructor is where the boundary check happens.
    pub fn new(lat: f64, lon: f64) -> Result<Self, TargetingError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TargetingError::InvalidInput(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(TargetingError::InvalidInput(format!(
                "longitude out of range: {lon}"
            )));
        }
        Ok(Position { lat, lon })
    }
}

/// Great-circle distance and initial bearing from `a` to `b`
///
/// Returns `(distance_m, bearing_deg)`. Distance uses the haversine
/// formula on a sphere of radius [`EARTH_RADIUS_M`]; the bearing is the
/// initial (forward) azimuth, normalized to [0, 360). Identical
/// positions yield `(0.0, 0.0)`.
pub fn distance_and_bearing(a: Position, b: Position) -> (f64, f64) {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let delta_phi = (b.lat - a.lat).to_radians();
    let delta_lambda = (b.lon - a.lon).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let distance = EARTH_RADIUS_M * 2.0 * h.sqrt().asin();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    let bearing = (x.atan2(y).to_degrees() + 360.0) % 360.0;

    (distance, bearing)
}

/// 8-point compass name for a heading in degrees
pub fn cardinal(deg: f64) -> &'static str {
    CARDINAL_NAMES[((deg / 45.0).round() as usize) % 8]
}
