//! WGS84 coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`distance`].
///
/// The Earth is treated as a sphere, so distances are an approximation with
/// an error of up to ~0.5% against the WGS84 ellipsoid. That is well below
/// the tolerance of a 50 m merge radius.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Error returned when latitude or longitude are outside WGS84 bounds.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({latitude}, {longitude}): {reason}")]
pub struct InvalidCoordinate {
    latitude: f64,
    longitude: f64,
    reason: &'static str,
}

/// A point in WGS84 decimal degrees.
///
/// Latitude is within [-90, 90] and longitude within [-180, 180]; both are
/// finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, validating WGS84 bounds.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        let invalid = |reason| InvalidCoordinate {
            latitude,
            longitude,
            reason,
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(invalid("must be finite"));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude must be within [-180, 180]"));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }
}

/// Haversine distance in meters between two coordinates.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon).unwrap())
    }

    proptest! {
        #[test]
        fn symmetric(p in any_coordinate(), q in any_coordinate()) {
            let d1 = distance(p, q);
            let d2 = distance(q, p);
            prop_assert!((d1 - d2).abs() < 1e-6);
        }

        #[test]
        fn non_negative_and_bounded(p in any_coordinate(), q in any_coordinate()) {
            let d = distance(p, q);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
        }

        #[test]
        fn identity(p in any_coordinate()) {
            prop_assert_eq!(distance(p, p), 0.0);
        }
    }
}
