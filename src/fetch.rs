use std::{fs, io::Read, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use thiserror::Error;
use ureq::{Agent, AgentBuilder};

use crate::{
    layout::{feed_dir, feed_path},
    retailers::{self, Retailer},
    utils::progress_bar,
    FetchSettings,
};

/// Why a single retailer's feed couldn't be downloaded. None of these stop the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(#[from] ureq::Transport),
    #[error("failed to read response body: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for FetchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => Self::Status(code),
            ureq::Error::Transport(x) => Self::Transport(x),
        }
    }
}

#[derive(Debug, Default)]
pub struct FetchSummary {
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<(String, FetchError)>,
}

pub fn agent(timeout: Duration, user_agent: &str) -> Agent {
    AgentBuilder::new()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// GETs `url` once, returning the body only for a 2xx response.
pub fn download(agent: &Agent, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = agent.get(url).call()?;

    let mut body = Vec::new();
    response.into_reader().read_to_end(&mut body)?;
    Ok(body)
}

/// Downloads every retailer in the record file into `<feed root>/<date>/<name>.json`.
pub fn run(settings: &FetchSettings) -> Result<FetchSummary> {
    let retailers = retailers::load(&settings.record_file)?;

    let dir = feed_dir(&settings.feed_root, settings.date);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create feed directory {}", dir.display()))?;

    let agent = agent(settings.timeout, &settings.user_agent);
    fetch_all(&agent, &retailers, settings)
}

pub fn fetch_all(
    agent: &Agent,
    retailers: &[Retailer],
    settings: &FetchSettings,
) -> Result<FetchSummary> {
    let mut summary = FetchSummary::default();
    let pb = progress_bar(retailers.len() as u64);

    for retailer in retailers {
        pb.set_message(retailer.name.clone());

        match download(agent, &retailer.json_url) {
            Ok(body) => {
                let path = feed_path(&settings.feed_root, settings.date, &retailer.name);
                fs::write(&path, body)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                pb.suspend(|| tracing::info!("Downloaded JSON for {}", retailer.name));
                summary.downloaded.push(path);
            }
            Err(e) => {
                pb.suspend(|| tracing::warn!("Failed to download JSON for {}: {e}", retailer.name));
                summary.failed.push((retailer.name.clone(), e));
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(summary)
}
