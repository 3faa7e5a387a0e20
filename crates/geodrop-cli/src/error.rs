//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] geodrop_catalog::CatalogError),

    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] geodrop_engine::EngineError),

    /// Coordinate error
    #[error("{0}")]
    Geo(#[from] geodrop_domain::GeoError),

    /// Location source refused to start
    #[error("Location unavailable: {0}")]
    Location(#[from] geodrop_engine::LocationFault),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// No catalog given on the command line or in the config file
    #[error("No target catalog. Pass --catalog or set `catalog` in geodrop.toml.")]
    NoCatalog,
}
