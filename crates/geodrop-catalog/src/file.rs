//! On-disk catalog format

use geodrop_domain::{GeoPoint, RenderHint, Target, TargetId, TierRadii};
use serde::{Deserialize, Serialize};

/// A catalog as written in TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Radii applied to targets that do not set their own
    #[serde(default)]
    pub defaults: CatalogDefaults,

    /// Target entries, in display order
    #[serde(default)]
    pub targets: Vec<TargetSpec>,
}

/// Catalog-wide defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CatalogDefaults {
    /// Default nearby radius in meters
    #[serde(default = "default_nearby_m")]
    pub nearby_m: f64,

    /// Default claimable radius in meters
    #[serde(default = "default_claimable_m")]
    pub claimable_m: f64,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            nearby_m: default_nearby_m(),
            claimable_m: default_claimable_m(),
        }
    }
}

impl CatalogDefaults {
    /// Default radii as a [`TierRadii`]
    pub fn radii(&self) -> TierRadii {
        TierRadii::new(self.nearby_m, self.claimable_m)
    }
}

fn default_nearby_m() -> f64 {
    50.0
}

fn default_claimable_m() -> f64 {
    10.0
}

/// One target entry as written in TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Unique identifier
    pub id: String,

    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Reward description
    #[serde(default)]
    pub reward: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,

    /// Rendering hints
    #[serde(default)]
    pub render: RenderHint,

    /// Per-target radii; the catalog defaults apply when absent
    #[serde(default)]
    pub radii: Option<TierRadii>,
}

impl TargetSpec {
    /// Build the domain target, filling in defaults
    ///
    /// No validation happens here; the catalog validates the whole set.
    pub fn into_target(self, defaults: &CatalogDefaults) -> Target {
        let id = TargetId::new(self.id);
        Target {
            name: self.name.unwrap_or_else(|| id.to_string()),
            id,
            location: GeoPoint::new_unchecked(self.latitude, self.longitude),
            reward: self.reward,
            description: self.description,
            render: self.render,
            radii: self.radii.unwrap_or_else(|| defaults.radii()),
        }
    }
}
