//! Configuration for the proximity engine
//!
//! Defines the distance formula, result ordering and fix acceptance rules.

use crate::EngineError;
use geodrop_domain::DistanceMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Order of results handed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrder {
    /// Same order as the input target set
    #[default]
    Input,
    /// Closest target first; ties keep input order
    Distance,
}

/// Configuration for the proximity engine
///
/// # Examples
///
/// ```
/// use geodrop_engine::{EngineConfig, ResultOrder};
///
/// // Default configuration (haversine, input order, every fix accepted)
/// let config = EngineConfig::default();
/// assert_eq!(config.ordering, ResultOrder::Input);
///
/// // AR camera view: reject fixes too coarse to resolve a 10 m radius
/// let config = EngineConfig::ar_view();
/// assert_eq!(config.max_accuracy_m, Some(25.0));
///
/// // Map view: closest airdrops first
/// let config = EngineConfig::map_view();
/// assert_eq!(config.ordering, ResultOrder::Distance);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Formula used to measure distances
    /// Default: haversine
    #[serde(default)]
    pub distance_method: DistanceMethod,

    /// Order of classification results
    /// Default: input order
    #[serde(default)]
    pub ordering: ResultOrder,

    /// Reject fixes whose reported accuracy radius exceeds this many meters
    /// Fixes without an accuracy estimate are always accepted
    /// Default: no limit
    #[serde(default)]
    pub max_accuracy_m: Option<f64>,

    /// Capacity of the channels between location source, worker and consumer
    /// Default: 64
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            distance_method: DistanceMethod::Haversine,
            ordering: ResultOrder::Input,
            max_accuracy_m: None,
            event_buffer: default_event_buffer(),
        }
    }
}

impl EngineConfig {
    /// AR camera view configuration
    ///
    /// - Haversine distances
    /// - Input order (the AR scene places entities by id)
    /// - Fixes coarser than 25 m rejected
    pub fn ar_view() -> Self {
        Self {
            max_accuracy_m: Some(25.0),
            ..Self::default()
        }
    }

    /// Map view configuration
    ///
    /// - Equirectangular distances (many targets, kilometer scale)
    /// - Closest first for the sidebar list
    pub fn map_view() -> Self {
        Self {
            distance_method: DistanceMethod::Equirectangular,
            ordering: ResultOrder::Distance,
            ..Self::default()
        }
    }

    /// Parse and validate configuration from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Check the configuration for values the engine cannot work with
    pub fn validate(&self) -> Result<(), EngineError> {
        if let Some(limit) = self.max_accuracy_m {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(EngineError::Config(format!(
                    "max_accuracy_m must be a positive number, got {}",
                    limit
                )));
            }
        }
        if self.event_buffer == 0 {
            return Err(EngineError::Config("event_buffer must be at least 1".to_string()));
        }
        Ok(())
    }
}
