//! Catalog error types

use geodrop_domain::{GeoError, TargetId};
use thiserror::Error;

/// Errors raised while loading or editing a target catalog
///
/// All of these are configuration problems and surface at load time, before
/// any location fix is classified.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse catalog TOML
    #[error("Failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Target placed at an invalid coordinate
    #[error("Target '{target_id}' has an invalid location: {source}")]
    InvalidCoordinate {
        /// Offending target
        target_id: TargetId,
        /// Underlying coordinate error
        source: GeoError,
    },

    /// Claimable radius larger than nearby radius
    #[error("Target '{target_id}' violates the radius invariant: claimable {claimable_m} m > nearby {nearby_m} m")]
    RadiusInvariant {
        /// Offending target
        target_id: TargetId,
        /// Nearby radius in meters
        nearby_m: f64,
        /// Claimable radius in meters
        claimable_m: f64,
    },

    /// Radius negative, non-finite or above the configured maximum
    #[error("Target '{target_id}' has an invalid radius: {reason}")]
    InvalidRadius {
        /// Offending target
        target_id: TargetId,
        /// Description of the issue
        reason: String,
    },

    /// Two targets share an id
    #[error("Duplicate target id: {0}")]
    DuplicateId(TargetId),

    /// Two targets share exactly the same location
    #[error("Target '{target_id}' duplicates the location of '{existing_id}'")]
    DuplicateLocation {
        /// Target being added
        target_id: TargetId,
        /// Target already at that location
        existing_id: TargetId,
    },

    /// No target with this id
    #[error("Unknown target: {0}")]
    UnknownTarget(TargetId),
}
