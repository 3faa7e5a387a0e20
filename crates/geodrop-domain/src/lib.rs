//! Geodrop Domain Layer
//!
//! This crate contains the value types and pure geometry shared by every other
//! Geodrop crate. It performs no I/O and owns no state.
//!
//! ## Key Concepts
//!
//! - **GeoPoint**: a validated latitude/longitude pair
//! - **Target**: an airdrop location with identity, metadata and tier radii
//! - **LiveLocation**: a sequenced position fix from a location source
//! - **Tier**: proximity classification (far → nearby → claimable)
//! - **Transition**: a change of tier between two consecutive classifications
//!
//! ## Architecture
//!
//! - Pure value types and distance functions only
//! - Classification state lives in `geodrop-engine`
//! - Trait definitions for the seams other crates plug into

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod geo;
pub mod location;
pub mod proximity;
pub mod target;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use distance::{distance, haversine, DistanceMethod, EARTH_RADIUS_M};
pub use geo::{GeoError, GeoPoint};
pub use location::LiveLocation;
pub use proximity::{ProximityResult, Transition};
pub use target::{RadiiError, RenderHint, RenderKind, Target, TargetId, TierRadii};
pub use tier::Tier;
pub use traits::{LatitudeBands, LinearScan, SpatialIndex, TargetProvider};
