//! Replay command implementation.

use crate::cli::ReplayArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use geodrop_catalog::TargetCatalog;
use geodrop_domain::{Target, Tier, Transition};
use geodrop_engine::{
    EngineConfig, EngineEvent, EngineMetrics, LocationSource, ProximityWorker, ReplaySource, StopReason,
};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Outcome of a replay.
#[derive(Debug)]
pub struct ReplayReport {
    /// Transitions in emission order, tagged with the fix sequence
    pub transitions: Vec<(u64, Transition)>,
    /// Targets claimed and removed during the replay
    pub claimed: Vec<Target>,
    /// Why the worker stopped
    pub stop: StopReason,
    /// Engine counters at the end of the replay
    pub metrics: EngineMetrics,
}

/// Execute the replay command.
pub async fn execute_replay(
    args: ReplayArgs,
    catalog: TargetCatalog,
    engine_config: &EngineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let contents = std::fs::read_to_string(&args.track)?;
    let source = ReplaySource::from_json_str(&contents)?
        .with_interval(Duration::from_millis(args.interval_ms))
        .with_capacity(engine_config.event_buffer);

    let mut config = engine_config.clone();
    if let Some(limit) = args.max_accuracy {
        config.max_accuracy_m = Some(limit);
        config.validate()?;
    }

    let (stop_tx, stop_rx) = oneshot::channel();
    let interrupt = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(());
            }
            Err(e) => {
                tracing::warn!("Ctrl-C handler unavailable: {}", e);
                // Dropping the sender would stop the worker
                std::future::pending::<()>().await;
            }
        }
    });

    let report = replay(source, catalog, config, args.claim, stop_rx, formatter).await;
    interrupt.abort();
    let report = report?;

    if args.metrics {
        eprintln!("{}", report.metrics.summary());
    }
    if !formatter.is_json() {
        let summary = format!(
            "Replay finished ({:?}): {} transition(s), {} claimed",
            report.stop,
            report.transitions.len(),
            report.claimed.len()
        );
        eprintln!("{}", formatter.success(&summary));
        for target in &report.claimed {
            eprintln!("{}", formatter.info(&format!("Claimed {}: {}", target.id, target.reward)));
        }
    }
    Ok(())
}

/// Drive `source` through a proximity worker and print every transition.
///
/// With `claim_on_arrival`, a target entering `Claimable` is removed from the
/// catalog and the reduced set is published to the worker.
pub async fn replay(
    mut source: ReplaySource,
    mut catalog: TargetCatalog,
    config: EngineConfig,
    claim_on_arrival: bool,
    shutdown: oneshot::Receiver<()>,
    formatter: &Formatter,
) -> Result<ReplayReport> {
    let subscription = source.subscribe()?;
    let (targets_tx, targets_rx) = watch::channel(catalog.targets().to_vec());
    let (events_tx, mut events_rx) = mpsc::channel(config.event_buffer);

    let mut worker = ProximityWorker::new(config);
    let run = worker.run(subscription, targets_rx, events_tx, shutdown);

    // Owns the receiver so an early return frees the worker's send
    let consume = async move {
        let mut transitions = Vec::new();
        let mut claimed = Vec::new();
        while let Some(event) = events_rx.recv().await {
            match event {
                EngineEvent::Update(update) => {
                    let sequence = update.location.sequence;
                    for transition in update.transitions {
                        println!("{}", formatter.format_transition(sequence, &transition)?);
                        if claim_on_arrival && transition.to == Tier::Claimable {
                            // A fix already in flight can re-enter a claimed target
                            if let Ok(target) = catalog.remove(&transition.target_id) {
                                // Worker gone means the replay is ending anyway
                                let _ = targets_tx.send(catalog.targets().to_vec());
                                claimed.push(target);
                            }
                        }
                        transitions.push((sequence, transition));
                    }
                }
                EngineEvent::Status(status) => {
                    if !formatter.is_json() {
                        eprintln!("{}", formatter.format_status(&status));
                    }
                }
            }
        }
        Ok::<_, CliError>((transitions, claimed))
    };

    let (stop, consumed) = tokio::join!(run, consume);
    let stop = stop?;
    let (transitions, claimed) = consumed?;

    Ok(ReplayReport {
        transitions,
        claimed,
        stop,
        metrics: worker.metrics().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use geodrop_domain::{GeoPoint, LiveLocation, TierRadii};
    use geodrop_engine::LocationEvent;

    /// Degrees of longitude per meter on the equator
    const DEG_PER_M: f64 = 1.0 / 111_194.926_644_558_7;

    fn walk(meters: &[f64]) -> ReplaySource {
        let events = meters
            .iter()
            .enumerate()
            .map(|(i, m)| {
                LocationEvent::Fix(LiveLocation::new(
                    GeoPoint::new_unchecked(0.0, m * DEG_PER_M),
                    i as u64 + 1,
                ))
            })
            .collect();
        ReplaySource::new(events)
    }

    fn catalog() -> TargetCatalog {
        let target = Target::new("drop", GeoPoint::new_unchecked(0.0, 0.0), TierRadii::new(50.0, 10.0))
            .with_reward("450 DCREW Tokens");
        TargetCatalog::from_targets(vec![target], Default::default()).unwrap()
    }

    #[tokio::test]
    async fn test_replay_without_claims() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let (_stop_tx, stop_rx) = oneshot::channel();
        let report = replay(
            walk(&[60.0, 30.0, 8.0, 8.0, 30.0]),
            catalog(),
            EngineConfig::default(),
            false,
            stop_rx,
            &formatter,
        )
        .await
        .unwrap();

        let sequences: Vec<u64> = report.transitions.iter().map(|(s, _)| *s).collect();
        assert_eq!(sequences, vec![2, 3, 5]);
        assert!(report.claimed.is_empty());
        assert_eq!(report.stop, StopReason::SourceEnded);
        assert_eq!(report.metrics.updates_applied, 5);
    }

    #[tokio::test]
    async fn test_claim_on_arrival() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let (_stop_tx, stop_rx) = oneshot::channel();
        let report = replay(
            walk(&[30.0, 8.0]),
            catalog(),
            EngineConfig::default(),
            true,
            stop_rx,
            &formatter,
        )
        .await
        .unwrap();

        assert_eq!(report.claimed.len(), 1);
        assert_eq!(report.claimed[0].reward, "450 DCREW Tokens");
        let tiers: Vec<Tier> = report.transitions.iter().map(|(_, t)| t.to).collect();
        assert_eq!(tiers, vec![Tier::Nearby, Tier::Claimable]);
    }

    #[tokio::test]
    async fn test_replay_with_single_slot_buffer() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let (_stop_tx, stop_rx) = oneshot::channel();
        let config = EngineConfig {
            event_buffer: 1,
            ..EngineConfig::default()
        };
        let meters: Vec<f64> = (0..40).map(|i| if i % 2 == 0 { 60.0 } else { 8.0 }).collect();

        let report = replay(walk(&meters), catalog(), config, false, stop_rx, &formatter)
            .await
            .unwrap();

        assert_eq!(report.stop, StopReason::SourceEnded);
        assert_eq!(report.transitions.len(), 39);
        assert_eq!(report.metrics.updates_applied, 40);
    }
}
