//! Coordinate type and great-circle distance.
//!
//! Locations travel through the system as a structured `Coordinate`;
//! the comma-joined `"lat,lng"` string form exists only at the storage
//! and wire boundaries (FromStr/Display).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers (haversine).
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair.
///
/// No range validation is performed: out-of-range values produce
/// mathematically defined but domain-meaningless distances. Callers
/// that need validated input must check ranges at their own boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid coordinate string: {0:?}")]
pub struct ParseCoordinateError(pub String);

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| ParseCoordinateError(s.to_string()))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseCoordinateError(s.to_string()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|_| ParseCoordinateError(s.to_string()))?;
        Ok(Self { lat, lng })
    }
}

impl fmt::Display for Coordinate {
    /// Storage form `"lat,lng"`. f64 Display emits the shortest string
    /// that round-trips, so serialize→parse is lossless.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Great-circle distance between two coordinates in kilometers
/// (haversine formula). Symmetric, non-negative, ~0 for equal points.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Round a distance to one decimal place for candidate annotations.
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        let c: Coordinate = "12.34,-56.78".parse().unwrap();
        assert_eq!(c.lat, 12.34);
        assert_eq!(c.lng, -56.78);
        let reparsed: Coordinate = c.to_string().parse().unwrap();
        assert_eq!(reparsed, c);
    }

    #[test]
    fn parse_trims_whitespace() {
        let c: Coordinate = " 1.5 , 2.5 ".parse().unwrap();
        assert_eq!(c, Coordinate::new(1.5, 2.5));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("not a coordinate".parse::<Coordinate>().is_err());
        assert!("12.34".parse::<Coordinate>().is_err());
        assert!("12.34,north".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn display_is_lossless_for_high_precision() {
        let c = Coordinate::new(12.971598765432101, 77.59456789012345);
        let reparsed: Coordinate = c.to_string().parse().unwrap();
        assert_eq!(reparsed, c);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(12.9716, 77.5946); // Bengaluru
        let b = Coordinate::new(13.0827, 80.2707); // Chennai
        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = Coordinate::new(28.6139, 77.2090);
        assert!(distance_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn distance_bengaluru_chennai_sanity() {
        // Great-circle distance is ~290 km.
        let a = Coordinate::new(12.9716, 77.5946);
        let b = Coordinate::new(13.0827, 80.2707);
        let d = distance_km(a, b);
        assert!((280.0..300.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_non_negative() {
        let a = Coordinate::new(-33.8688, 151.2093);
        let b = Coordinate::new(51.5074, -0.1278);
        assert!(distance_km(a, b) > 0.0);
    }

    #[test]
    fn round_to_tenth_rounds_to_one_decimal() {
        assert_eq!(round_to_tenth(79.96), 80.0);
        assert_eq!(round_to_tenth(12.34), 12.3);
        assert_eq!(round_to_tenth(12.37), 12.4);
        assert_eq!(round_to_tenth(0.0), 0.0);
    }
}
