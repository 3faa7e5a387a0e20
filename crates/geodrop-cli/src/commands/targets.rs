//! Targets command implementation.

use crate::commands::load_catalog;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the targets command.
pub fn execute_targets(config: &Config, catalog: Option<&Path>, formatter: &Formatter) -> Result<()> {
    let catalog = load_catalog(config, catalog)?;
    println!("{}", formatter.format_targets(catalog.targets())?);
    if !formatter.is_json() {
        eprintln!("{}", formatter.success(&format!("Catalog valid: {} target(s)", catalog.len())));
    }
    Ok(())
}
