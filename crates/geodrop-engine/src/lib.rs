//! Geodrop Proximity Engine
//!
//! Classifies airdrop targets against a moving, error-prone location signal.
//!
//! # Overview
//!
//! The engine is responsible for:
//! - **Classification**: distance and tier (far / nearby / claimable) for every target
//! - **Transition detection**: edge-triggered events when a target changes tier
//! - **Stale fix rejection**: late fixes cannot resurrect or clear a tier
//! - **Fault retention**: a sensor fault keeps the last good results on screen
//! - **Metrics collection**: counters for dropped fixes and transitions
//!
//! ## Tiers
//!
//! | Tier | Condition | Typical consumer reaction |
//! |------|-----------|---------------------------|
//! | **Far** | `distance > nearby_m` | Hide |
//! | **Nearby** | `claimable_m < distance <= nearby_m` | Show on map / AR view |
//! | **Claimable** | `distance <= claimable_m` | Enable the claim action |
//!
//! # Usage
//!
//! ## Synchronous
//!
//! ```
//! use geodrop_domain::{GeoPoint, LiveLocation, Target, Tier, TierRadii};
//! use geodrop_engine::ProximityEngine;
//!
//! let targets = vec![
//!     Target::new("4", GeoPoint::new(12.979025, 77.728035).unwrap(), TierRadii::new(50.0, 10.0)),
//! ];
//! let mut engine = ProximityEngine::default_config();
//!
//! let fix = LiveLocation::new(GeoPoint::new(12.979050, 77.728040).unwrap(), 1);
//! let update = engine.update(fix, &targets).unwrap();
//! for transition in &update.transitions {
//!     if transition.is_entering(Tier::Claimable) {
//!         println!("claim available: {}", transition.target_id);
//!     }
//! }
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use geodrop_engine::{EngineConfig, LocationSource, ProximityWorker, ReplaySource};
//! use tokio::sync::{mpsc, oneshot, watch};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut source = ReplaySource::from_json_str(&std::fs::read_to_string("track.json")?)?;
//!     let subscription = source.subscribe()?;
//!     let (_targets_tx, targets_rx) = watch::channel(Vec::new());
//!     let (events_tx, _events_rx) = mpsc::channel(64);
//!     let (_stop_tx, stop_rx) = oneshot::channel();
//!
//!     let mut worker = ProximityWorker::new(EngineConfig::ar_view());
//!     worker.run(subscription, targets_rx, events_tx, stop_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The engine can be configured via TOML:
//!
//! ```toml
//! distance_method = "haversine"
//! ordering = "input"
//! max_accuracy_m = 25.0
//! event_buffer = 64
//! ```

#![warn(missing_docs)]

mod classify;
mod config;
mod engine;
mod error;
mod metrics;
mod source;
mod worker;

pub use classify::{
    classify, classify_indexed, classify_with, diff_tiers, Classification, RejectReason, Rejection,
};
pub use config::{EngineConfig, ResultOrder};
pub use engine::{LocationStatus, ProximityEngine, ProximityUpdate};
pub use error::EngineError;
pub use metrics::EngineMetrics;
pub use source::{channel, LocationEvent, LocationFault, LocationFeed, LocationSource, LocationSubscription, ReplaySource};
pub use worker::{EngineEvent, ProximityWorker, StopReason};
