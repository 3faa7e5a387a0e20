//! Tier module - proximity classification of a target

use serde::{Deserialize, Serialize};
use std::fmt;

/// Proximity tier of a target relative to the user
///
/// Tiers are ordered by closeness, so `Far < Nearby < Claimable`:
/// - Far: outside the target's nearby radius
/// - Nearby: inside the nearby radius, worth rendering on the map or AR view
/// - Claimable: inside the claimable radius, an external claim may proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Beyond the nearby radius
    Far,

    /// Within the nearby radius
    Nearby,

    /// Within the claimable radius
    Claimable,
}

impl Tier {
    /// All tiers from farthest to closest
    pub const ALL: [Tier; 3] = [Tier::Far, Tier::Nearby, Tier::Claimable];

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Far => "far",
            Tier::Nearby => "nearby",
            Tier::Claimable => "claimable",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "far" => Some(Tier::Far),
            "nearby" => Some(Tier::Nearby),
            "claimable" => Some(Tier::Claimable),
            _ => None,
        }
    }

    /// Get the next tier closer to the target
    pub fn next(&self) -> Option<Self> {
        match self {
            Tier::Far => Some(Tier::Nearby),
            Tier::Nearby => Some(Tier::Claimable),
            Tier::Claimable => None, // Already closest
        }
    }

    /// Get the previous tier, farther from the target
    pub fn previous(&self) -> Option<Self> {
        match self {
            Tier::Far => None,
            Tier::Nearby => Some(Tier::Far),
            Tier::Claimable => Some(Tier::Nearby),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_progression() {
        assert_eq!(Tier::Far.next(), Some(Tier::Nearby));
        assert_eq!(Tier::Nearby.next(), Some(Tier::Claimable));
        assert_eq!(Tier::Claimable.next(), None);
    }

    #[test]
    fn test_tier_regression() {
        assert_eq!(Tier::Claimable.previous(), Some(Tier::Nearby));
        assert_eq!(Tier::Nearby.previous(), Some(Tier::Far));
        assert_eq!(Tier::Far.previous(), None);
    }

    #[test]
    fn test_ordering() {
        assert!(Tier::Far < Tier::Nearby);
        assert!(Tier::Nearby < Tier::Claimable);
    }

    #[test]
    fn test_parse() {
        assert_eq!("CLAIMABLE".parse::<Tier>(), Ok(Tier::Claimable));
        assert_eq!(Tier::parse("far"), Some(Tier::Far));
        assert!(Tier::parse("renderable").is_none());
    }
}
