//! Distance estimates consumed by A*.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Remaining-cost estimate supplied by a vertex payload.
///
/// For A* to return optimal paths the estimate must be admissible: it never
/// exceeds the true cost of the cheapest path from `self` to `target`.
pub trait Heuristic {
    fn estimate(&self, target: &Self) -> f64;
}

/// Great-circle distance in kilometers between two points given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another point in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl Heuristic for GeoPoint {
    fn estimate(&self, target: &Self) -> f64 {
        self.distance_km(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_km(48.85, 2.35, 48.85, 2.35), 0.0);
    }

    #[test]
    fn test_haversine_paris_london() {
        // Paris (48.8566, 2.3522) to London (51.5074, -0.1278) is about 344 km
        let d = haversine_km(48.8566, 2.3522, 51.5074, -0.1278);
        assert!((d - 343.5).abs() < 2.0, "got {d}");
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = GeoPoint::new(48.8738, 2.2950);
        let b = GeoPoint::new(48.8443, 2.3744);
        assert!((a.estimate(&b) - b.estimate(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = GeoPoint::new(0.0, 0.0).distance_km(&GeoPoint::new(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.1, "got {d}");
    }
}
