//! Geographic point module

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised by coordinate validation
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeoError {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or NaN
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },
}

/// A position on the Earth's surface in decimal degrees
///
/// Immutable value type. Use [`GeoPoint::new`] for untrusted input; it rejects
/// NaN and out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a validated point
    ///
    /// # Examples
    ///
    /// ```
    /// use geodrop_domain::GeoPoint;
    ///
    /// assert!(GeoPoint::new(12.979025, 77.728035).is_ok());
    /// assert!(GeoPoint::new(200.0, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        let point = Self::new_unchecked(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Create a point without validation
    ///
    /// For trusted inputs, or for data that is validated later (catalog load,
    /// engine hot path).
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components are finite and inside their ranges
    pub fn is_valid(&self) -> bool {
        // NaN fails both range checks
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Check the point, returning `InvalidCoordinate` on failure
    pub fn validate(&self) -> Result<(), GeoError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Latitude in radians
    pub fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    /// Longitude in radians
    pub fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            GeoPoint::new(200.0, 10.0),
            Err(GeoError::InvalidCoordinate {
                latitude: 200.0,
                longitude: 10.0
            })
        );
        assert!(GeoPoint::new(0.0, 180.5).is_err());
        assert!(GeoPoint::new(-90.1, 0.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
        assert!(!GeoPoint::new_unchecked(f64::INFINITY, 0.0).is_valid());
    }

    #[test]
    fn test_display() {
        let p = GeoPoint::new_unchecked(12.979025, 77.728035);
        assert_eq!(p.to_string(), "(12.979025, 77.728035)");
    }
}
