//! Live location fixes

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A position fix delivered by a location source
///
/// `sequence` increases monotonically per source. Sensors may redeliver an
/// older cached fix, so consumers compare sequences rather than arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveLocation {
    /// Reported position
    #[serde(flatten)]
    pub point: GeoPoint,
    /// Monotonic sequence number or timestamp
    pub sequence: u64,
    /// Horizontal accuracy radius in meters, when the sensor reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
}

impl LiveLocation {
    /// Create a fix without an accuracy estimate
    pub fn new(point: GeoPoint, sequence: u64) -> Self {
        Self {
            point,
            sequence,
            accuracy_m: None,
        }
    }

    /// Attach an accuracy estimate
    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    /// Whether this fix supersedes a previously retained one
    pub fn is_newer_than(&self, other: &LiveLocation) -> bool {
        self.sequence > other.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_ordering() {
        let p = GeoPoint::new_unchecked(0.0, 0.0);
        let five = LiveLocation::new(p, 5);
        let three = LiveLocation::new(p, 3);
        assert!(five.is_newer_than(&three));
        assert!(!three.is_newer_than(&five));
        assert!(!five.is_newer_than(&five));
    }
}
