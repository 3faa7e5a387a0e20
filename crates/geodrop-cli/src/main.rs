//! Geodrop CLI - Command-line interface for the Geodrop proximity engine.

use anyhow::Context;
use clap::Parser;
use geodrop_cli::commands;
use geodrop_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Log to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let catalog_override = cli.catalog.as_deref();

    match cli.command {
        Command::Distance(args) => {
            commands::execute_distance(args, &formatter)?;
        }
        Command::Targets => {
            commands::execute_targets(&config, catalog_override, &formatter)?;
        }
        Command::Classify(args) => {
            let catalog = commands::load_catalog(&config, catalog_override).context("failed to load catalog")?;
            commands::execute_classify(args, &catalog, &config.engine, &formatter)?;
        }
        Command::Replay(args) => {
            let catalog = commands::load_catalog(&config, catalog_override).context("failed to load catalog")?;
            commands::execute_replay(args, catalog, &config.engine, &formatter).await?;
        }
    }

    Ok(())
}
