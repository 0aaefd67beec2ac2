//! Great-circle geometry for nearest-station matching.
//!
//! Distances are computed with the haversine formula on a spherical Earth.
//! Coordinates are stored in radians, converted once on construction.

use crate::constants::EARTH_RADIUS_KM;

/// A latitude/longitude pair in radians.
///
/// Built from degrees; callers are responsible for supplying coordinates in
/// the valid domain (latitude -90..=90, longitude -180..=180). Out-of-domain
/// or NaN input is not validated here and propagates into the distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat_rad: f64,
    lon_rad: f64,
}

impl Coordinate {
    /// Create a coordinate from degrees.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self {
            lat_rad: latitude.to_radians(),
            lon_rad: longitude.to_radians(),
        }
    }

    /// Great-circle distance to another coordinate in kilometers.
    ///
    /// Pure function of the two coordinates: symmetric, zero for identical
    /// points, monotonic with angular separation. NaN input yields NaN.
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        let delta_lat = other.lat_rad - self.lat_rad;
        let delta_lon = other.lon_rad - self.lon_rad;

        let h = (delta_lat / 2.0).sin().powi(2)
            + self.lat_rad.cos() * other.lat_rad.cos() * (delta_lon / 2.0).sin().powi(2);

        2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
    }
}
