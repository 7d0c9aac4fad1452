use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use stations::{config::FEED_ROOT, logging, validate, RunDate, ValidateSettings};

/// Compare each station's site_id with the geohash of its coordinates.
#[derive(Debug, Parser)]
struct Cli {
    /// Directory containing a dd-mm-yyyy folder of JSON feeds.
    #[arg(long = "fuel_prices_directory", default_value = FEED_ROOT)]
    fuel_prices_directory: PathBuf,

    /// Date of the feeds to check, also used for the errors folder (dd-mm-yyyy). Defaults to today.
    #[arg(long)]
    date: Option<RunDate>,
}

fn main() -> Result<()> {
    logging::init_logging()?;

    let cli = Cli::parse();
    let settings = ValidateSettings::new(
        cli.fuel_prices_directory,
        cli.date.unwrap_or_else(RunDate::today),
    );

    let summary = validate::run(&settings)?;

    tracing::info!(
        "{} feeds checked, {} could not be read",
        summary.checked.len(),
        summary.failed.len()
    );
    if !summary.is_ok() {
        for (file, e) in &summary.failed {
            tracing::error!("{file}: {e}");
        }
        bail!("{} feeds could not be checked", summary.failed.len());
    }

    Ok(())
}
