//! Core proximity engine: the only stateful part of the classification path

use crate::classify::{classify_with, diff_tiers, Classification};
use crate::source::LocationFault;
use crate::{EngineConfig, EngineError, EngineMetrics, ResultOrder};
use geodrop_domain::{LiveLocation, ProximityResult, Target, Transition};

/// What the engine currently knows about the location signal
#[derive(Debug, Clone, PartialEq)]
pub enum LocationStatus {
    /// No fix accepted yet
    Waiting,
    /// Last event was an accepted fix
    Tracking,
    /// The source reported a fault; retained results are from the last good fix
    Unavailable(LocationFault),
}

/// Outcome of an accepted fix or a reclassification
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityUpdate {
    /// Fix the results were computed from
    pub location: LiveLocation,
    /// Per-target results and rejections
    pub classification: Classification,
    /// Tier changes since the previous accepted classification
    pub transitions: Vec<Transition>,
}

/// Proximity engine
///
/// Holds the last accepted fix and the last result set, nothing else. It owns
/// no timers and performs no I/O. Calls take `&mut self`; a multi-threaded
/// host must serialize them.
///
/// # Examples
///
/// ```
/// use geodrop_domain::{GeoPoint, LiveLocation, Target, Tier, TierRadii};
/// use geodrop_engine::{EngineConfig, ProximityEngine};
///
/// let targets = vec![Target::new("4", GeoPoint::new(0.0, 0.0).unwrap(), TierRadii::new(50.0, 10.0))];
/// let mut engine = ProximityEngine::new(EngineConfig::default());
///
/// let fix = LiveLocation::new(GeoPoint::new(0.0, 0.00005).unwrap(), 1);
/// let update = engine.update(fix, &targets).unwrap();
/// assert_eq!(update.transitions[0].to, Tier::Claimable);
///
/// // Same tier again: no new transition
/// let fix = LiveLocation::new(GeoPoint::new(0.0, 0.00006).unwrap(), 2);
/// assert!(engine.update(fix, &targets).unwrap().transitions.is_empty());
/// ```
#[derive(Debug)]
pub struct ProximityEngine {
    config: EngineConfig,
    last_location: Option<LiveLocation>,
    last_results: Vec<ProximityResult>,
    status: LocationStatus,
    metrics: EngineMetrics,
}

impl ProximityEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            last_location: None,
            last_results: Vec::new(),
            status: LocationStatus::Waiting,
            metrics: EngineMetrics::new(),
        }
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Current location status
    pub fn status(&self) -> &LocationStatus {
        &self.status
    }

    /// Last accepted fix
    pub fn last_location(&self) -> Option<&LiveLocation> {
        self.last_location.as_ref()
    }

    /// Results of the last accepted classification
    pub fn last_results(&self) -> &[ProximityResult] {
        &self.last_results
    }

    /// Classify a new fix against `targets`
    ///
    /// The fix is rejected, with retained state untouched, when:
    /// - its coordinate is invalid (`InvalidLocation`)
    /// - its sequence is not newer than the retained fix (`StaleUpdate`)
    /// - its accuracy is worse than `max_accuracy_m` (`InaccurateFix`)
    ///
    /// Otherwise it becomes the retained fix and the transitions against the
    /// previous results are returned.
    pub fn update(&mut self, location: LiveLocation, targets: &[Target]) -> Result<ProximityUpdate, EngineError> {
        if let Err(e) = location.point.validate() {
            self.metrics.record_invalid_location();
            return Err(EngineError::InvalidLocation(e));
        }

        if let Some(retained) = &self.last_location {
            if !location.is_newer_than(retained) {
                self.metrics.record_stale();
                return Err(EngineError::StaleUpdate {
                    received: location.sequence,
                    retained: retained.sequence,
                });
            }
        }

        if let (Some(limit_m), Some(accuracy_m)) = (self.config.max_accuracy_m, location.accuracy_m) {
            // NaN accuracy counts as inaccurate
            if accuracy_m.is_nan() || accuracy_m > limit_m {
                self.metrics.record_inaccurate();
                return Err(EngineError::InaccurateFix {
                    sequence: location.sequence,
                    accuracy_m,
                    limit_m,
                });
            }
        }

        let update = self.apply(location, targets)?;
        self.last_location = Some(location);
        self.status = LocationStatus::Tracking;
        self.metrics.record_update();
        Ok(update)
    }

    /// Reclassify the retained fix against a changed target set
    ///
    /// Used after the caller removes a claimed target or the provider
    /// publishes new ones. Removed targets produce no transition.
    pub fn reclassify(&mut self, targets: &[Target]) -> Result<ProximityUpdate, EngineError> {
        let location = self.last_location.ok_or(EngineError::NoLocation)?;
        let update = self.apply(location, targets)?;
        self.metrics.record_reclassification();
        Ok(update)
    }

    /// Record a location source fault
    ///
    /// The retained fix and results are kept so consumers do not flicker to
    /// an empty view on a transient sensor hiccup.
    pub fn report_fault(&mut self, fault: LocationFault) -> EngineError {
        tracing::warn!("Location source fault: {}", fault);
        self.metrics.record_fault();
        self.status = LocationStatus::Unavailable(fault.clone());
        EngineError::LocationUnavailable(fault)
    }

    /// Forget the retained fix and results (e.g. a new session)
    pub fn reset(&mut self) {
        self.last_location = None;
        self.last_results.clear();
        self.status = LocationStatus::Waiting;
    }

    fn apply(&mut self, location: LiveLocation, targets: &[Target]) -> Result<ProximityUpdate, EngineError> {
        let mut classification = classify_with(&location, targets, self.config.distance_method)?;

        for rejection in &classification.rejected {
            tracing::warn!(
                "Excluding target {} from classification: {}",
                rejection.target_id,
                rejection.reason
            );
        }

        let transitions = diff_tiers(&self.last_results, &classification.results);
        for transition in &transitions {
            tracing::info!("Target {}", transition);
        }

        if self.config.ordering == ResultOrder::Distance {
            classification.sort_by_distance();
        }

        tracing::debug!(
            "Fix #{} classified {} targets, {} transitions",
            location.sequence,
            classification.results.len(),
            transitions.len()
        );

        self.metrics.record_rejections(classification.rejected.len());
        self.metrics.record_transitions(&transitions);
        self.last_results = classification.results.clone();

        Ok(ProximityUpdate {
            location,
            classification,
            transitions,
        })
    }
}
