//! Target module - an airdrop placed at a geographic location

use crate::geo::GeoPoint;
use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a target, as supplied by the target provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    /// Create a new identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A malformed [`TierRadii`]
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RadiiError {
    /// Negative, NaN or infinite radius
    #[error("{radius} radius {value} must be finite and non-negative")]
    Invalid {
        /// Which radius (`nearby` or `claimable`)
        radius: &'static str,
        /// Offending value
        value: f64,
    },

    /// Claimable radius larger than the nearby radius
    #[error("claimable radius {claimable_m} m exceeds nearby radius {nearby_m} m")]
    Inverted {
        /// Nearby radius in meters
        nearby_m: f64,
        /// Claimable radius in meters
        claimable_m: f64,
    },
}

/// Radii in meters bounding the nearby and claimable tiers of one target
///
/// Well-formed radii satisfy `0 <= claimable_m <= nearby_m`, both finite.
/// Construction does not enforce this; catalogs check it with
/// [`TierRadii::check`] at load time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierRadii {
    /// Outer radius: within it the target is at least `Nearby`
    pub nearby_m: f64,
    /// Inner radius: within it the target is `Claimable`
    pub claimable_m: f64,
}

impl TierRadii {
    /// Create a radius pair
    pub const fn new(nearby_m: f64, claimable_m: f64) -> Self {
        Self { nearby_m, claimable_m }
    }

    /// Report the first problem with these radii, if any
    pub fn check(&self) -> Result<(), RadiiError> {
        for (radius, value) in [("nearby", self.nearby_m), ("claimable", self.claimable_m)] {
            if !value.is_finite() || value < 0.0 {
                return Err(RadiiError::Invalid { radius, value });
            }
        }
        if self.claimable_m > self.nearby_m {
            return Err(RadiiError::Inverted {
                nearby_m: self.nearby_m,
                claimable_m: self.claimable_m,
            });
        }
        Ok(())
    }

    /// Classify a distance against these radii
    ///
    /// # Examples
    ///
    /// ```
    /// use geodrop_domain::{Tier, TierRadii};
    ///
    /// let radii = TierRadii::new(50.0, 10.0);
    /// assert_eq!(radii.tier_for(8.0), Tier::Claimable);
    /// assert_eq!(radii.tier_for(30.0), Tier::Nearby);
    /// assert_eq!(radii.tier_for(60.0), Tier::Far);
    /// ```
    pub fn tier_for(&self, distance_m: f64) -> Tier {
        if distance_m <= self.claimable_m {
            Tier::Claimable
        } else if distance_m <= self.nearby_m {
            Tier::Nearby
        } else {
            Tier::Far
        }
    }
}

impl Default for TierRadii {
    /// 50 m nearby, 10 m claimable: the AR view's thresholds
    fn default() -> Self {
        Self::new(50.0, 10.0)
    }
}

/// How a rendering layer should present a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    /// Draw an image or animation asset
    #[default]
    Image,
    /// Draw a text label
    Text,
}

/// Presentation hints passed through to the rendering layer untouched
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderHint {
    /// Presentation style
    #[serde(default)]
    pub kind: RenderKind,
    /// Asset path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
}

/// An airdrop placed at a location, with its own tier radii
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique identifier
    pub id: TargetId,
    /// Display name
    pub name: String,
    /// Location of the airdrop
    pub location: GeoPoint,
    /// Reward description (e.g. "450 DCREW Tokens")
    pub reward: String,
    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rendering hints
    #[serde(default)]
    pub render: RenderHint,
    /// Tier radii for this target
    pub radii: TierRadii,
}

impl Target {
    /// Create a target with default metadata
    pub fn new(id: impl Into<TargetId>, location: GeoPoint, radii: TierRadii) -> Self {
        let id = id.into();
        Self {
            name: id.to_string(),
            id,
            location,
            reward: String::new(),
            description: None,
            render: RenderHint::default(),
            radii,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the reward description
    pub fn with_reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = reward.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii_boundaries_are_inclusive() {
        let radii = TierRadii::new(50.0, 10.0);
        assert_eq!(radii.tier_for(10.0), Tier::Claimable);
        assert_eq!(radii.tier_for(10.000001), Tier::Nearby);
        assert_eq!(radii.tier_for(50.0), Tier::Nearby);
        assert_eq!(radii.tier_for(50.000001), Tier::Far);
        assert_eq!(radii.tier_for(0.0), Tier::Claimable);
    }

    #[test]
    fn test_radii_check() {
        assert!(TierRadii::new(50.0, 10.0).check().is_ok());
        assert!(TierRadii::new(10.0, 10.0).check().is_ok());
        assert_eq!(
            TierRadii::new(10.0, 50.0).check(),
            Err(RadiiError::Inverted {
                nearby_m: 10.0,
                claimable_m: 50.0
            })
        );
        assert!(matches!(
            TierRadii::new(-1.0, -2.0).check(),
            Err(RadiiError::Invalid { radius: "nearby", .. })
        ));
        assert!(matches!(
            TierRadii::new(20.0, f64::NAN).check(),
            Err(RadiiError::Invalid { radius: "claimable", .. })
        ));
        assert!(TierRadii::new(f64::INFINITY, 1.0).check().is_err());
    }

    #[test]
    fn test_target_builder() {
        let target = Target::new("4", GeoPoint::new_unchecked(12.979025, 77.728035), TierRadii::default())
            .with_name("Team DCrew Airdrop 4")
            .with_reward("450 DCREW Tokens");
        assert_eq!(target.id.as_str(), "4");
        assert_eq!(target.name, "Team DCrew Airdrop 4");
        assert_eq!(target.render.kind, RenderKind::Image);
    }
}
