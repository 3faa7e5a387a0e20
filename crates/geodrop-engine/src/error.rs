//! Error types for engine operations

use crate::source::LocationFault;
use geodrop_domain::{GeoError, TargetId};
use thiserror::Error;

/// Errors that can occur during engine operations
///
/// None of these are fatal. Per-target coordinate problems are collected in a
/// [`Classification`](crate::Classification) instead of aborting the batch,
/// and a rejected fix leaves the engine's retained state untouched.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A target carries an invalid coordinate
    #[error("Target '{target_id}' has an invalid location: {source}")]
    InvalidCoordinate {
        /// Offending target
        target_id: TargetId,
        /// Underlying coordinate error
        source: GeoError,
    },

    /// Two targets in one set share an id
    #[error("Target '{0}' appears more than once in the target set")]
    DuplicateTarget(TargetId),

    /// A location fix carries an invalid coordinate
    #[error("Invalid location fix: {0}")]
    InvalidLocation(GeoError),

    /// The fix's reported accuracy is worse than the configured limit
    #[error("Location fix #{sequence} too inaccurate: {accuracy_m} m > {limit_m} m")]
    InaccurateFix {
        /// Sequence of the rejected fix
        sequence: u64,
        /// Reported accuracy radius in meters
        accuracy_m: f64,
        /// Configured limit in meters
        limit_m: f64,
    },

    /// The location source reported denial or absence
    #[error("Location unavailable: {0}")]
    LocationUnavailable(LocationFault),

    /// A fix older than the retained one arrived late
    #[error("Stale location update #{received} (retained #{retained})")]
    StaleUpdate {
        /// Sequence of the dropped fix
        received: u64,
        /// Sequence currently retained
        retained: u64,
    },

    /// Reclassification requested before any fix was accepted
    #[error("No location fix has been accepted yet")]
    NoLocation,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a configuration file
    #[error("Failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    /// Failed to parse configuration TOML
    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
