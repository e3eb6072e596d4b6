//! Keelbook report runner
//!
//! Loads a JSON snapshot, runs one report and prints it as JSON on stdout.
//! Logs go to stderr.

mod cli;
mod snapshot;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keelbook_shared::AppConfig;

use crate::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(command = ?cli.command, "Generating report");
    let output = cli.run(&config)?;
    println!("{output}");

    Ok(())
}
