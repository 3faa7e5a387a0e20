//! Metrics collection for engine operations

use geodrop_domain::{Tier, Transition};
use std::collections::HashMap;

/// Counters collected by the engine
///
/// Stale fixes are counted here rather than surfaced to the user.
#[derive(Debug, Clone, Default)]
pub struct EngineMetrics {
    /// Fixes accepted and classified
    pub updates_applied: usize,

    /// Reclassifications triggered by target set changes
    pub reclassifications: usize,

    /// Fixes dropped because an equal or newer sequence was retained
    pub stale_dropped: usize,

    /// Fixes dropped for an invalid coordinate
    pub invalid_locations: usize,

    /// Fixes dropped for poor accuracy
    pub inaccurate_dropped: usize,

    /// Location source faults reported
    pub faults: usize,

    /// Target exclusions across all classifications
    pub rejected_targets: usize,

    /// Transitions counted by destination tier
    pub entered: HashMap<Tier, usize>,
}

impl EngineMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted fix
    pub fn record_update(&mut self) {
        self.updates_applied += 1;
    }

    /// Record a reclassification against the retained fix
    pub fn record_reclassification(&mut self) {
        self.reclassifications += 1;
    }

    /// Record a stale fix
    pub fn record_stale(&mut self) {
        self.stale_dropped += 1;
    }

    /// Record a fix with an invalid coordinate
    pub fn record_invalid_location(&mut self) {
        self.invalid_locations += 1;
    }

    /// Record a fix dropped for accuracy
    pub fn record_inaccurate(&mut self) {
        self.inaccurate_dropped += 1;
    }

    /// Record a location source fault
    pub fn record_fault(&mut self) {
        self.faults += 1;
    }

    /// Record excluded targets
    pub fn record_rejections(&mut self, count: usize) {
        self.rejected_targets += count;
    }

    /// Record emitted transitions
    pub fn record_transitions(&mut self, transitions: &[Transition]) {
        for transition in transitions {
            *self.entered.entry(transition.to).or_insert(0) += 1;
        }
    }

    /// Total transitions across all tiers
    pub fn total_transitions(&self) -> usize {
        self.entered.values().sum()
    }

    /// Fixes dropped for any reason
    pub fn total_dropped(&self) -> usize {
        self.stale_dropped + self.invalid_locations + self.inaccurate_dropped
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Proximity Engine Metrics".to_string(),
            "========================".to_string(),
            format!("Fixes applied: {}", self.updates_applied),
            format!("Reclassifications: {}", self.reclassifications),
            format!(
                "Fixes dropped: {} (stale {}, invalid {}, inaccurate {})",
                self.total_dropped(),
                self.stale_dropped,
                self.invalid_locations,
                self.inaccurate_dropped
            ),
            format!("Source faults: {}", self.faults),
            format!("Rejected targets: {}", self.rejected_targets),
        ];

        if !self.entered.is_empty() {
            lines.push(String::new());
            lines.push("Transitions into tier:".to_string());
            for tier in Tier::ALL {
                if let Some(count) = self.entered.get(&tier) {
                    lines.push(format!("  {}: {}", tier, count));
                }
            }
            lines.push(format!("  Total: {}", self.total_transitions()));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: Tier, to: Tier) -> Transition {
        Transition {
            target_id: "4".into(),
            from,
            to,
        }
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = EngineMetrics::new();
        assert_eq!(metrics.updates_applied, 0);
        assert_eq!(metrics.total_transitions(), 0);
        assert_eq!(metrics.total_dropped(), 0);
    }

    #[test]
    fn test_record_transitions() {
        let mut metrics = EngineMetrics::new();
        metrics.record_transitions(&[
            transition(Tier::Far, Tier::Nearby),
            transition(Tier::Nearby, Tier::Claimable),
            transition(Tier::Claimable, Tier::Nearby),
        ]);

        assert_eq!(*metrics.entered.get(&Tier::Nearby).unwrap(), 2);
        assert_eq!(*metrics.entered.get(&Tier::Claimable).unwrap(), 1);
        assert_eq!(metrics.total_transitions(), 3);
    }

    #[test]
    fn test_dropped_totals() {
        let mut metrics = EngineMetrics::new();
        metrics.record_stale();
        metrics.record_stale();
        metrics.record_invalid_location();
        metrics.record_inaccurate();
        assert_eq!(metrics.total_dropped(), 4);
    }

    #[test]
    fn test_reset() {
        let mut metrics = EngineMetrics::new();
        metrics.record_update();
        metrics.record_fault();
        metrics.record_transitions(&[transition(Tier::Far, Tier::Nearby)]);

        metrics.reset();

        assert_eq!(metrics.updates_applied, 0);
        assert_eq!(metrics.faults, 0);
        assert_eq!(metrics.total_transitions(), 0);
    }

    #[test]
    fn test_summary() {
        let mut metrics = EngineMetrics::new();
        metrics.record_update();
        metrics.record_stale();
        metrics.record_transitions(&[transition(Tier::Nearby, Tier::Claimable)]);

        let summary = metrics.summary();
        assert!(summary.contains("Fixes applied: 1"));
        assert!(summary.contains("stale 1"));
        assert!(summary.contains("claimable: 1"));
    }
}
