use std::{path::PathBuf, time::Duration};

use crate::RunDate;

/// Characters in a station's `site_id` geohash.
pub const PRECISION: usize = 12;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

// some retailers reject requests without a browser user agent
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/51.0.2704.103 Safari/537.36";

pub const RECORD_FILE: &str = "retailers.csv";
pub const FEED_ROOT: &str = "./fuel_prices";
pub const ERRORS_ROOT: &str = "./errors";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub record_file: PathBuf,
    pub feed_root: PathBuf,
    pub date: RunDate,
    pub timeout: Duration,
    pub user_agent: String,
}

impl FetchSettings {
    pub fn new(date: RunDate) -> Self {
        Self {
            record_file: PathBuf::from(RECORD_FILE),
            feed_root: PathBuf::from(FEED_ROOT),
            date,
            timeout: FETCH_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidateSettings {
    pub feed_root: PathBuf,
    pub errors_root: PathBuf,
    pub date: RunDate,
    pub precision: usize,
}

impl ValidateSettings {
    pub fn new(feed_root: PathBuf, date: RunDate) -> Self {
        Self {
            feed_root,
            errors_root: PathBuf::from(ERRORS_ROOT),
            date,
            precision: PRECISION,
        }
    }
}
