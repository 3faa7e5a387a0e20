//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use geodrop_catalog::TargetCatalog;
use geodrop_domain::{GeoPoint, LiveLocation, ProximityResult, Tier};
use geodrop_engine::{EngineConfig, ProximityEngine};

/// Execute the classify command.
pub fn execute_classify(
    args: ClassifyArgs,
    catalog: &TargetCatalog,
    engine_config: &EngineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let results = classify_position(&args, catalog, engine_config, formatter)?;
    println!("{}", formatter.format_results(&results, catalog)?);
    Ok(())
}

fn classify_position(
    args: &ClassifyArgs,
    catalog: &TargetCatalog,
    engine_config: &EngineConfig,
    formatter: &Formatter,
) -> Result<Vec<ProximityResult>> {
    let mut config = engine_config.clone();
    if let Some(method) = args.method {
        config.distance_method = method.into();
    }

    let here = LiveLocation::new(GeoPoint::new(args.latitude, args.longitude)?, 1);
    let mut engine = ProximityEngine::new(config);
    let update = engine.update(here, catalog.targets())?;

    for rejection in &update.classification.rejected {
        eprintln!("{}", formatter.warning(&format!("Skipped {}: {}", rejection.target_id, rejection.reason)));
    }

    let min_tier = args.tier.map(Tier::from).unwrap_or(Tier::Far);
    Ok(update
        .classification
        .results
        .into_iter()
        .filter(|r| r.tier >= min_tier)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TierArg;
    use crate::config::OutputFormat;
    use geodrop_engine::ResultOrder;

    const CATALOG: &str = r#"
[[targets]]
id = "4"
latitude = 12.979025
longitude = 77.728035
reward = "450 DCREW Tokens"

[[targets]]
id = "5"
latitude = 12.978735
longitude = 77.727962
reward = "550 DCREW Tokens"

[[targets]]
id = "far"
latitude = 13.5
longitude = 77.5
reward = "1 DCREW Token"
"#;

    fn args(tier: Option<TierArg>) -> ClassifyArgs {
        ClassifyArgs {
            latitude: 12.979025,
            longitude: 77.728035,
            tier,
            method: None,
        }
    }

    #[test]
    fn test_classify_all() {
        let catalog = TargetCatalog::from_toml_str(CATALOG).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let results = classify_position(&args(None), &catalog, &EngineConfig::default(), &formatter).unwrap();

        let tiers: Vec<Tier> = results.iter().map(|r| r.tier).collect();
        assert_eq!(tiers, vec![Tier::Claimable, Tier::Nearby, Tier::Far]);
    }

    #[test]
    fn test_tier_filter_and_ordering() {
        let catalog = TargetCatalog::from_toml_str(CATALOG).unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let config = EngineConfig {
            ordering: ResultOrder::Distance,
            ..EngineConfig::default()
        };
        let results = classify_position(&args(Some(TierArg::Nearby)), &catalog, &config, &formatter).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(ids, vec!["4", "5"]);
    }
}
