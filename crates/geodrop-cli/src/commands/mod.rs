//! Command implementations.

pub mod classify;
pub mod distance;
pub mod replay;
pub mod targets;

pub use self::classify::execute_classify;
pub use self::distance::execute_distance;
pub use self::replay::execute_replay;
pub use self::targets::execute_targets;

use crate::config::Config;
use crate::error::Result;
use geodrop_catalog::TargetCatalog;
use std::path::Path;

/// Load the catalog named on the command line or in the config file.
pub fn load_catalog(config: &Config, cli_override: Option<&Path>) -> Result<TargetCatalog> {
    let path = config.catalog_path(cli_override)?;
    Ok(TargetCatalog::from_file_with(&path, config.validation.into())?)
}
