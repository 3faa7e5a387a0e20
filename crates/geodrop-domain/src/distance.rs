//! Great-circle distance on a spherical Earth
//!
//! [`haversine`] is the canonical formula and the engine's default. The other
//! [`DistanceMethod`] variants trade accuracy for speed and exist for callers
//! that evaluate very large target sets.

use crate::geo::{GeoError, GeoPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Formula used to measure the distance between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMethod {
    /// Haversine great-circle distance (accurate at all scales)
    #[default]
    Haversine,

    /// Spherical law of cosines (loses precision below ~1 m)
    SphericalLawOfCosines,

    /// Equirectangular projection (fast, good for short distances)
    Equirectangular,
}

impl DistanceMethod {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMethod::Haversine => "haversine",
            DistanceMethod::SphericalLawOfCosines => "spherical_law_of_cosines",
            DistanceMethod::Equirectangular => "equirectangular",
        }
    }

    /// Parse a method from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "haversine" => Some(DistanceMethod::Haversine),
            "spherical_law_of_cosines" | "cosines" => Some(DistanceMethod::SphericalLawOfCosines),
            "equirectangular" | "fast" => Some(DistanceMethod::Equirectangular),
            _ => None,
        }
    }

    /// Measure the distance in meters between two already-validated points
    pub fn measure(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        if a == b {
            return 0.0;
        }
        match self {
            DistanceMethod::Haversine => haversine(a, b),
            DistanceMethod::SphericalLawOfCosines => law_of_cosines(a, b),
            DistanceMethod::Equirectangular => equirectangular(a, b),
        }
    }

    /// Validate both points, then measure
    pub fn checked(&self, a: GeoPoint, b: GeoPoint) -> Result<f64, GeoError> {
        a.validate()?;
        b.validate()?;
        Ok(self.measure(a, b))
    }
}

impl std::str::FromStr for DistanceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid distance method: {}", s))
    }
}

/// Haversine distance in meters between two points
///
/// Fails with [`GeoError::InvalidCoordinate`] when either point is out of range
/// or NaN.
///
/// # Examples
///
/// ```
/// use geodrop_domain::{distance, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 0.0).unwrap();
/// let b = GeoPoint::new(0.0, 1.0).unwrap();
/// let d = distance(a, b).unwrap();
/// assert!((d - 111_195.0).abs() < 50.0);
/// ```
pub fn distance(a: GeoPoint, b: GeoPoint) -> Result<f64, GeoError> {
    DistanceMethod::Haversine.checked(a, b)
}

/// Haversine distance in meters, without validation
///
/// `h` is clamped to [0, 1] so rounding near identical or antipodal points
/// cannot produce NaN.
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let sin_phi = (d_phi / 2.0).sin();
    let sin_lambda = (d_lambda / 2.0).sin();
    let h = (sin_phi * sin_phi + phi1.cos() * phi2.cos() * sin_lambda * sin_lambda).clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

fn law_of_cosines(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let cos_c = (phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * d_lambda.cos()).clamp(-1.0, 1.0);
    cos_c.acos() * EARTH_RADIUS_M
}

fn equirectangular(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat_rad();
    let phi2 = b.lat_rad();
    let mut d_lambda = (b.longitude - a.longitude).to_radians();
    // Shortest way around the antimeridian
    if d_lambda > PI {
        d_lambda -= 2.0 * PI;
    } else if d_lambda < -PI {
        d_lambda += 2.0 * PI;
    }

    let x = d_lambda * ((phi1 + phi2) / 2.0).cos();
    let y = phi2 - phi1;
    (x * x + y * y).sqrt() * EARTH_RADIUS_M
}
