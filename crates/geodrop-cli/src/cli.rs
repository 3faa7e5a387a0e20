//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use geodrop_domain::DistanceMethod;
use std::path::PathBuf;

/// Geodrop CLI - Classify airdrops against a location.
#[derive(Debug, Parser)]
#[command(name = "geodrop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ./geodrop.toml if present)
    #[arg(short, long, global = true, env = "GEODROP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Target catalog file (overrides the config file)
    #[arg(long, global = true, env = "GEODROP_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Great-circle distance between two points
    Distance(DistanceArgs),

    /// Classify every catalog target against one position
    Classify(ClassifyArgs),

    /// Replay a recorded location track and print tier transitions
    Replay(ReplayArgs),

    /// Validate a catalog and list its targets
    Targets,
}

/// Arguments for the distance command.
#[derive(Debug, Parser)]
pub struct DistanceArgs {
    /// Latitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub from_lat: f64,

    /// Longitude of the first point
    #[arg(allow_negative_numbers = true)]
    pub from_lon: f64,

    /// Latitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub to_lat: f64,

    /// Longitude of the second point
    #[arg(allow_negative_numbers = true)]
    pub to_lon: f64,

    /// Distance formula
    #[arg(short, long, value_enum, default_value = "haversine")]
    pub method: MethodArg,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub longitude: f64,

    /// Only show targets in this tier or closer
    #[arg(short, long, value_enum)]
    pub tier: Option<TierArg>,

    /// Distance formula (overrides the config file)
    #[arg(short, long, value_enum)]
    pub method: Option<MethodArg>,
}

/// Arguments for the replay command.
#[derive(Debug, Parser)]
pub struct ReplayArgs {
    /// JSON file with the recorded location events
    pub track: PathBuf,

    /// Delay between events in milliseconds
    #[arg(short, long, default_value = "0")]
    pub interval_ms: u64,

    /// Reject fixes whose accuracy radius exceeds this many meters
    #[arg(long)]
    pub max_accuracy: Option<f64>,

    /// Claim targets on arrival: remove them from the catalog and reclassify
    #[arg(long)]
    pub claim: bool,

    /// Print the engine metrics after the replay
    #[arg(long)]
    pub metrics: bool,
}

/// Distance formula argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MethodArg {
    /// Haversine (accurate at every scale)
    Haversine,
    /// Spherical law of cosines
    Cosines,
    /// Equirectangular approximation (fast, short range)
    Equirectangular,
}

/// Tier argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum TierArg {
    /// Beyond the nearby radius
    Far,
    /// Within the nearby radius
    Nearby,
    /// Within the claim radius
    Claimable,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<MethodArg> for DistanceMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Haversine => DistanceMethod::Haversine,
            MethodArg::Cosines => DistanceMethod::SphericalLawOfCosines,
            MethodArg::Equirectangular => DistanceMethod::Equirectangular,
        }
    }
}

impl From<TierArg> for geodrop_domain::Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Far => geodrop_domain::Tier::Far,
            TierArg::Nearby => geodrop_domain::Tier::Nearby,
            TierArg::Claimable => geodrop_domain::Tier::Claimable,
        }
    }
}
