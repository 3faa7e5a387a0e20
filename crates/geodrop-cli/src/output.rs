//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use geodrop_catalog::TargetCatalog;
use geodrop_domain::{DistanceMethod, ProximityResult, Target, Tier, Transition};
use geodrop_engine::LocationStatus;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a measured distance.
    pub fn format_distance(&self, meters: f64, method: DistanceMethod) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "distance_m": meters,
                "method": method,
            }))?),
            OutputFormat::Table => Ok(format!("{} ({})", format_meters(meters), method.as_str())),
            OutputFormat::Quiet => Ok(format!("{:.3}", meters)),
        }
    }

    /// Format classification results, looking up names and rewards in `catalog`.
    pub fn format_results(&self, results: &[ProximityResult], catalog: &TargetCatalog) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
            OutputFormat::Table => Ok(self.format_results_table(results, catalog)),
            OutputFormat::Quiet => {
                let ids: Vec<&str> = results.iter().map(|r| r.target_id.as_str()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    fn format_results_table(&self, results: &[ProximityResult], catalog: &TargetCatalog) -> String {
        if results.is_empty() {
            return self.colorize("No targets in range.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Name", "Distance", "Tier", "Reward"]);

        for result in results {
            let (name, reward) = catalog
                .get(&result.target_id)
                .map(|t| (t.name.as_str(), t.reward.as_str()))
                .unwrap_or(("", ""));
            builder.push_record([
                result.target_id.to_string(),
                name.to_string(),
                format_meters(result.distance_m),
                self.tier_label(result.tier),
                reward.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the targets of a catalog.
    pub fn format_targets(&self, targets: &[Target]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(targets)?),
            OutputFormat::Quiet => {
                let ids: Vec<&str> = targets.iter().map(|t| t.id.as_str()).collect();
                Ok(ids.join("\n"))
            }
            OutputFormat::Table => {
                if targets.is_empty() {
                    return Ok(self.colorize("Catalog is empty.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Location", "Nearby", "Claimable", "Reward"]);
                for target in targets {
                    builder.push_record([
                        target.id.to_string(),
                        target.name.clone(),
                        target.location.to_string(),
                        format_meters(target.radii.nearby_m),
                        format_meters(target.radii.claimable_m),
                        target.reward.clone(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
        }
    }

    /// Format one tier transition from a replay.
    pub fn format_transition(&self, sequence: u64, transition: &Transition) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string(&serde_json::json!({
                "sequence": sequence,
                "transition": transition,
            }))?),
            OutputFormat::Quiet => Ok(format!("{} {}", transition.target_id, transition.to)),
            OutputFormat::Table => {
                let arrow = if transition.is_approach() { "→" } else { "←" };
                Ok(format!(
                    "#{:<5} {} {} {} {}",
                    sequence,
                    transition.target_id,
                    self.tier_label(transition.from),
                    arrow,
                    self.tier_label(transition.to)
                ))
            }
        }
    }

    /// Format a location status change from a replay.
    pub fn format_status(&self, status: &LocationStatus) -> String {
        match status {
            LocationStatus::Waiting => self.info("Waiting for a location fix"),
            LocationStatus::Tracking => self.info("Location tracking"),
            LocationStatus::Unavailable(fault) => {
                self.warning(&format!("Location unavailable: {} (keeping last results)", fault))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Whether machine-readable output is selected.
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn tier_label(&self, tier: Tier) -> String {
        let color = match tier {
            Tier::Claimable => "green",
            Tier::Nearby => "yellow",
            Tier::Far => "",
        };
        self.colorize(tier.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Meters below 1 km, kilometers above.
pub fn format_meters(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{:.1} m", meters)
    } else {
        format!("{:.2} km", meters / 1_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodrop_domain::{GeoPoint, TierRadii};

    fn catalog() -> TargetCatalog {
        let mut catalog = TargetCatalog::default();
        catalog
            .insert(
                Target::new("4", GeoPoint::new_unchecked(12.979025, 77.728035), TierRadii::new(50.0, 10.0))
                    .with_name("Team DCrew Airdrop 4")
                    .with_reward("450 DCREW Tokens"),
            )
            .unwrap();
        catalog
    }

    fn result() -> ProximityResult {
        ProximityResult {
            target_id: "4".into(),
            distance_m: 8.25,
            tier: Tier::Claimable,
        }
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_results(&[result()], &catalog()).unwrap();
        assert!(output.contains("Team DCrew Airdrop 4"));
        assert!(output.contains("8.2 m") || output.contains("8.3 m"));
        assert!(output.contains("claimable"));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_results(&[result()], &catalog()).unwrap();
        let parsed: Vec<ProximityResult> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, vec![result()]);
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_results(&[result()], &catalog()).unwrap();
        assert_eq!(output, "4");
    }

    #[test]
    fn test_empty_results() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_results(&[], &catalog()).unwrap();
        assert!(output.contains("No targets in range"));
    }

    #[test]
    fn test_transition_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let transition = Transition {
            target_id: "4".into(),
            from: Tier::Nearby,
            to: Tier::Claimable,
        };
        let line = formatter.format_transition(3, &transition).unwrap();
        assert!(line.contains("nearby → claimable"));
    }

    #[test]
    fn test_format_meters() {
        assert_eq!(format_meters(17.02), "17.0 m");
        assert_eq!(format_meters(111_194.9), "111.19 km");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
