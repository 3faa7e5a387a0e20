//! Configuration file for the CLI.
//!
//! Loaded from `--config <path>` or `./geodrop.toml` when present:
//!
//! ```toml
//! catalog = "airdrops.toml"
//! validation = "strict"
//!
//! [settings]
//! color = true
//! format = "table"
//!
//! [engine]
//! max_accuracy_m = 25.0
//! ```

use crate::error::{CliError, Result};
use geodrop_catalog::ValidationConfig;
use geodrop_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "geodrop.toml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Target catalog; relative paths resolve against the config file's directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// How strictly the catalog is checked on load
    #[serde(default)]
    pub validation: ValidationPreset,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Proximity engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// Named catalog validation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPreset {
    /// Reject duplicate locations, nearby radius up to 50 km
    #[default]
    Default,
    /// Only the structural checks
    Permissive,
    /// Reject duplicate locations, nearby radius up to 1 km
    Strict,
}

impl From<ValidationPreset> for ValidationConfig {
    fn from(preset: ValidationPreset) -> Self {
        match preset {
            ValidationPreset::Default => ValidationConfig::default(),
            ValidationPreset::Permissive => ValidationConfig::permissive(),
            ValidationPreset::Strict => ValidationConfig::strict(),
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `./geodrop.toml` is used
    /// when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&contents)?;

        if let (Some(catalog), Some(dir)) = (&config.catalog, path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(dir.join(catalog));
            }
        }
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config
            .engine
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Catalog path, preferring the command-line override.
    pub fn catalog_path(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.catalog.clone())
            .ok_or(CliError::NoCatalog)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
