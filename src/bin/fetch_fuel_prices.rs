use anyhow::Result;

use stations::{fetch, logging, FetchSettings, RunDate};

fn main() -> Result<()> {
    logging::init_logging()?;

    let settings = FetchSettings::new(RunDate::today());
    let summary = fetch::run(&settings)?;

    tracing::info!(
        "{} feeds downloaded, {} failed",
        summary.downloaded.len(),
        summary.failed.len()
    );

    Ok(())
}
