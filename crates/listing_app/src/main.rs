//! Command-line entry point for the listing harvester.
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use listing_engine::{load_settings, load_start_urls, scrape_all, write_payloads};

/// Scrape rental listing URLs into structured JSON.
#[derive(Debug, Parser)]
#[command(name = "listing_app", version, about)]
struct Args {
    /// Path to the input JSON file with start URLs.
    #[arg(short, long, default_value = "data/input.json")]
    input: PathBuf,

    /// Path to the output JSON file.
    #[arg(short, long, default_value = "data/output.json")]
    output: PathBuf,

    /// Path to the settings JSON file.
    #[arg(short, long, default_value = "config/settings.json")]
    settings: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.verbose);

    let settings = load_settings(&args.settings);
    let urls = load_start_urls(&args.input).context("unable to load input urls")?;

    let payloads = scrape_all(&urls, &settings).await;
    write_payloads(&args.output, &payloads).context("unable to write output")?;
    engine_info!("run complete: {} record(s)", payloads.len());
    Ok(())
}
