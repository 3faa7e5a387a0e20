//! Classification outputs: per-target results and tier transitions

use crate::target::TargetId;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance and tier of one target for one location fix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityResult {
    /// Target this result describes
    pub target_id: TargetId,
    /// Distance from the user in meters (never negative)
    pub distance_m: f64,
    /// Tier derived from the distance and the target's radii
    pub tier: Tier,
}

/// A change of tier for one target between two classifications
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Target whose tier changed
    pub target_id: TargetId,
    /// Tier before
    pub from: Tier,
    /// Tier after
    pub to: Tier,
}

impl Transition {
    /// Whether this transition crosses into `tier`
    ///
    /// # Examples
    ///
    /// ```
    /// use geodrop_domain::{Tier, Transition};
    ///
    /// let t = Transition { target_id: "4".into(), from: Tier::Nearby, to: Tier::Claimable };
    /// assert!(t.is_entering(Tier::Claimable));
    /// assert!(!t.is_exiting(Tier::Claimable));
    /// ```
    pub fn is_entering(&self, tier: Tier) -> bool {
        self.to == tier && self.from != tier
    }

    /// Whether this transition leaves `tier`
    pub fn is_exiting(&self, tier: Tier) -> bool {
        self.from == tier && self.to != tier
    }

    /// The user moved closer
    pub fn is_approach(&self) -> bool {
        self.to > self.from
    }

    /// The user moved away
    pub fn is_retreat(&self) -> bool {
        self.to < self.from
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.target_id, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        let approach = Transition {
            target_id: "4".into(),
            from: Tier::Far,
            to: Tier::Nearby,
        };
        assert!(approach.is_approach());
        assert!(!approach.is_retreat());
        assert!(approach.is_exiting(Tier::Far));

        let retreat = Transition {
            target_id: "4".into(),
            from: Tier::Claimable,
            to: Tier::Nearby,
        };
        assert!(retreat.is_retreat());
        assert!(retreat.is_exiting(Tier::Claimable));
        assert_eq!(retreat.to_string(), "4: claimable -> nearby");
    }
}
