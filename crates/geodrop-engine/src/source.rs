//! Push-based location sources
//!
//! A [`LocationSource`] hands out a [`LocationSubscription`] that yields
//! [`LocationEvent`]s. Dropping or unsubscribing the subscription closes its
//! channel, and producers stop as soon as they observe the closed channel.

use geodrop_domain::LiveLocation;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A condition reported by the location source instead of a fix
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationFault {
    /// The user or platform denied location access
    #[error("permission denied")]
    PermissionDenied,

    /// The device has no location capability
    #[error("not supported on this device")]
    Unsupported,

    /// The sensor did not produce a fix in time
    #[error("timed out waiting for a fix")]
    Timeout,

    /// Any other source-specific failure
    #[error("{0}")]
    Unavailable(String),
}

/// One item delivered by a location source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationEvent {
    /// A new position fix
    Fix(LiveLocation),
    /// A fault instead of a fix
    Fault(LocationFault),
}

/// Supplies location events via a push subscription
pub trait LocationSource {
    /// Start delivering events
    ///
    /// A source that cannot start at all (permission denied, no sensor)
    /// returns the fault here rather than panicking.
    fn subscribe(&mut self) -> Result<LocationSubscription, LocationFault>;
}

/// Receiving end of a location subscription
#[derive(Debug)]
pub struct LocationSubscription {
    events: mpsc::Receiver<LocationEvent>,
    producer: Option<JoinHandle<()>>,
}

impl LocationSubscription {
    /// Wrap a receiver fed by an external producer
    pub fn new(events: mpsc::Receiver<LocationEvent>) -> Self {
        Self {
            events,
            producer: None,
        }
    }

    /// Attach the task producing events so [`close`](Self::close) can await it
    pub fn with_producer(mut self, producer: JoinHandle<()>) -> Self {
        self.producer = Some(producer);
        self
    }

    /// Wait for the next event; `None` once the producer has finished
    pub async fn next(&mut self) -> Option<LocationEvent> {
        self.events.recv().await
    }

    /// Stop delivery without waiting for the producer to exit
    pub fn unsubscribe(mut self) {
        self.events.close();
    }

    /// Stop delivery and wait until the producer task has exited
    pub async fn close(mut self) {
        self.events.close();
        if let Some(producer) = self.producer.take() {
            if let Err(e) = producer.await {
                tracing::warn!("Location producer ended abnormally: {}", e);
            }
        }
    }
}

/// Sending end for hosts that push fixes from their own sensor callbacks
#[derive(Debug, Clone)]
pub struct LocationFeed {
    events: mpsc::Sender<LocationEvent>,
}

impl LocationFeed {
    /// Push an event; returns `false` once the subscriber has gone away
    pub async fn push(&self, event: LocationEvent) -> bool {
        self.events.send(event).await.is_ok()
    }

    /// Whether the subscriber has unsubscribed
    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }

    /// Resolves when the subscriber unsubscribes; release platform watch handles then
    pub async fn closed(&self) {
        self.events.closed().await
    }
}

/// Create a connected feed and subscription
pub fn channel(capacity: usize) -> (LocationFeed, LocationSubscription) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (LocationFeed { events: tx }, LocationSubscription::new(rx))
}

/// Replays a recorded sequence of events
///
/// Each subscription spawns a task on the current tokio runtime that sends
/// the events in order, pausing `interval` before each one. The task exits
/// when the events run out or the subscription is closed.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    events: Vec<LocationEvent>,
    interval: Duration,
    capacity: usize,
    refuse_with: Option<LocationFault>,
}

impl ReplaySource {
    /// Replay `events` with no delay between them
    pub fn new(events: Vec<LocationEvent>) -> Self {
        Self {
            events,
            interval: Duration::ZERO,
            capacity: 64,
            refuse_with: None,
        }
    }

    /// Parse a JSON array of events
    ///
    /// ```
    /// use geodrop_engine::ReplaySource;
    ///
    /// let source = ReplaySource::from_json_str(r#"[
    ///     {"fix": {"latitude": 12.979272, "longitude": 77.727549, "sequence": 1}},
    ///     {"fault": "permission_denied"}
    /// ]"#).unwrap();
    /// assert_eq!(source.len(), 2);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// A source whose subscription always fails with `fault`
    pub fn refusing(fault: LocationFault) -> Self {
        Self {
            refuse_with: Some(fault),
            ..Self::new(Vec::new())
        }
    }

    /// Pause between events
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Channel capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether there is nothing to replay
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl LocationSource for ReplaySource {
    fn subscribe(&mut self) -> Result<LocationSubscription, LocationFault> {
        if let Some(fault) = &self.refuse_with {
            return Err(fault.clone());
        }
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| LocationFault::Unavailable("no async runtime to drive replay".to_string()))?;

        let (tx, rx) = mpsc::channel(self.capacity);
        let events = self.events.clone();
        let interval = self.interval;

        let producer = runtime.spawn(async move {
            for event in events {
                if !interval.is_zero() {
                    tokio::select! {
                        _ = tokio::time::sleep(interval) => {}
                        _ = tx.closed() => return,
                    }
                }
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            tracing::debug!("Replay finished");
        });

        Ok(LocationSubscription::new(rx).with_producer(producer))
    }
}
