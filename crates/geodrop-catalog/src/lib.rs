//! Geodrop Catalog
//!
//! Loads and validates the set of airdrop targets before any classification
//! runs.
//!
//! The catalog provides:
//! - TOML loading with catalog-wide default radii and per-target overrides
//! - Coordinate validation
//! - The radius invariant (`claimable <= nearby`), enforced at load time
//! - Duplicate id and duplicate location detection
//! - Removal of claimed targets
//!
//! # Examples
//!
//! ```
//! use geodrop_catalog::TargetCatalog;
//!
//! let catalog = TargetCatalog::from_toml_str(r#"
//!     [defaults]
//!     nearby_m = 50.0
//!     claimable_m = 10.0
//!
//!     [[targets]]
//!     id = "4"
//!     name = "Team DCrew Airdrop 4"
//!     latitude = 12.979025
//!     longitude = 77.728035
//!     reward = "450 DCREW Tokens"
//! "#).unwrap();
//!
//! assert_eq!(catalog.len(), 1);
//! ```

#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod file;

pub use catalog::TargetCatalog;
pub use config::ValidationConfig;
pub use error::CatalogError;
pub use file::{CatalogDefaults, CatalogFile, TargetSpec};
