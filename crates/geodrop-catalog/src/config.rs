//! Catalog validation configuration

/// Configuration for catalog validation rules
///
/// Coordinate checks and the radius invariant always run; the rules here
/// control the optional checks.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Reject two targets placed at exactly the same coordinate
    pub reject_duplicate_locations: bool,

    /// Largest nearby radius accepted, in meters
    ///
    /// Catches radii entered in the wrong unit (kilometers vs meters).
    pub max_nearby_m: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_duplicate_locations: true,
            max_nearby_m: 50_000.0,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (minimal validation)
    pub fn permissive() -> Self {
        Self {
            reject_duplicate_locations: false,
            max_nearby_m: f64::MAX,
        }
    }

    /// Create a strict configuration for walking-range AR catalogs
    pub fn strict() -> Self {
        Self {
            reject_duplicate_locations: true,
            max_nearby_m: 1_000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.reject_duplicate_locations);
        assert_eq!(config.max_nearby_m, 50_000.0);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.reject_duplicate_locations);
        assert_eq!(config.max_nearby_m, f64::MAX);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(config.reject_duplicate_locations);
        assert_eq!(config.max_nearby_m, 1_000.0);
    }
}
