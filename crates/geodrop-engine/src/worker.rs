//! Async worker driving the engine from a location subscription

use crate::engine::{LocationStatus, ProximityEngine, ProximityUpdate};
use crate::source::{LocationEvent, LocationSubscription};
use crate::{EngineConfig, EngineError, EngineMetrics};
use geodrop_domain::Target;
use tokio::sync::{mpsc, oneshot, watch};

/// Event forwarded to the rendering layer or claim workflow
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A fix or target change was classified
    Update(ProximityUpdate),
    /// The location signal changed state
    Status(LocationStatus),
}

/// Why a worker stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The location source finished delivering
    SourceEnded,
    /// The consumer dropped its event receiver
    ConsumerGone,
    /// Shutdown was signalled
    Shutdown,
}

/// Background worker that feeds location events through a [`ProximityEngine`]
///
/// The worker owns the engine, so calls into it are serialized by
/// construction. Targets come from a `watch` channel: publishing a new set
/// reclassifies the retained fix immediately.
///
/// # Examples
///
/// ```no_run
/// use geodrop_engine::{EngineConfig, LocationSource, ProximityWorker, ReplaySource};
/// use tokio::sync::{mpsc, oneshot, watch};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut source = ReplaySource::from_json_str("[]")?;
///     let subscription = source.subscribe()?;
///     let (_targets_tx, targets_rx) = watch::channel(Vec::new());
///     let (events_tx, mut events_rx) = mpsc::channel(64);
///     let (_stop_tx, stop_rx) = oneshot::channel();
///
///     let mut worker = ProximityWorker::new(EngineConfig::default());
///     let handle = tokio::spawn(async move {
///         worker.run(subscription, targets_rx, events_tx, stop_rx).await
///     });
///
///     while let Some(event) = events_rx.recv().await {
///         println!("{:?}", event);
///     }
///     handle.await??;
///     Ok(())
/// }
/// ```
pub struct ProximityWorker {
    engine: ProximityEngine,
}

impl ProximityWorker {
    /// Create a new worker with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: ProximityEngine::new(config),
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Run until the source ends, the consumer goes away or `shutdown` fires
    ///
    /// Dropping the `shutdown` sender also stops the worker. The subscription
    /// is closed before returning, so no producer task outlives the call.
    ///
    /// # Errors
    ///
    /// Per-fix errors are logged and counted, never returned. The `Result` is
    /// reserved for failures of the worker itself.
    pub async fn run(
        &mut self,
        mut subscription: LocationSubscription,
        mut targets: watch::Receiver<Vec<Target>>,
        events: mpsc::Sender<EngineEvent>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<StopReason, EngineError> {
        tracing::info!("Proximity worker started");

        let mut targets_open = true;
        let reason = loop {
            tokio::select! {
                event = subscription.next() => {
                    let Some(event) = event else {
                        break StopReason::SourceEnded;
                    };
                    if !forward(&events, self.handle_event(event, &mut targets)).await {
                        break StopReason::ConsumerGone;
                    }
                }
                changed = targets.changed(), if targets_open => {
                    if changed.is_err() {
                        // Provider gone: keep classifying against the last set
                        targets_open = false;
                        continue;
                    }
                    if !forward(&events, self.handle_targets_changed(&mut targets)).await {
                        break StopReason::ConsumerGone;
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown signal received, stopping proximity worker");
                    break StopReason::Shutdown;
                }
            }
        };

        subscription.close().await;
        tracing::info!(
            "Proximity worker stopped ({:?}). Final metrics:\n{}",
            reason,
            self.engine.metrics().summary()
        );

        Ok(reason)
    }

    /// Apply one location event
    ///
    /// The first accepted fix, and the first one after a fault, is preceded by
    /// a `Status(Tracking)` event.
    fn handle_event(
        &mut self,
        event: LocationEvent,
        targets: &mut watch::Receiver<Vec<Target>>,
    ) -> Vec<EngineEvent> {
        match event {
            LocationEvent::Fix(fix) => {
                let was_tracking = matches!(self.engine.status(), LocationStatus::Tracking);
                let result = {
                    let current = targets.borrow_and_update();
                    self.engine.update(fix, &current)
                };
                match result {
                    Ok(update) if was_tracking => vec![EngineEvent::Update(update)],
                    Ok(update) => {
                        tracing::info!("Location tracking (fix #{})", fix.sequence);
                        vec![
                            EngineEvent::Status(LocationStatus::Tracking),
                            EngineEvent::Update(update),
                        ]
                    }
                    Err(e @ EngineError::StaleUpdate { .. }) => {
                        tracing::debug!("{}", e);
                        Vec::new()
                    }
                    Err(e) => {
                        tracing::warn!("Dropped location fix: {}", e);
                        Vec::new()
                    }
                }
            }
            LocationEvent::Fault(fault) => {
                self.engine.report_fault(fault);
                vec![EngineEvent::Status(self.engine.status().clone())]
            }
        }
    }

    fn handle_targets_changed(&mut self, targets: &mut watch::Receiver<Vec<Target>>) -> Vec<EngineEvent> {
        let result = {
            let current = targets.borrow_and_update();
            tracing::debug!("Target set changed ({} targets)", current.len());
            self.engine.reclassify(&current)
        };
        match result {
            Ok(update) => vec![EngineEvent::Update(update)],
            Err(EngineError::NoLocation) => Vec::new(),
            Err(e) => {
                tracing::warn!("Reclassification failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Get the engine
    pub fn engine(&self) -> &ProximityEngine {
        &self.engine
    }

    /// Get a reference to the engine's current metrics
    pub fn metrics(&self) -> &EngineMetrics {
        self.engine.metrics()
    }

    /// Reset the engine's metrics counters
    pub fn reset_metrics(&mut self) {
        self.engine.reset_metrics();
    }
}

/// Send events in order; false once the consumer is gone
async fn forward(events: &mpsc::Sender<EngineEvent>, out: Vec<EngineEvent>) -> bool {
    for event in out {
        if events.send(event).await.is_err() {
            return false;
        }
    }
    true
}
