//! Where the fetcher puts feeds and where the validator puts its reports.
//!
//! Both jobs only talk through the filesystem, so every path either of them
//! touches is built here.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{Local, NaiveDate};
use thiserror::Error;

pub const FEED_EXTENSION: &str = "json";
pub const DUPLICATES_SUFFIX: &str = "_duplicates.csv";
pub const MISMATCHES_SUFFIX: &str = "_geohash_mismatches.csv";

const DATE_FORMAT: &str = "%d-%m-%Y";

/// The day a batch runs for, written `dd-mm-yyyy` in directory names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunDate(NaiveDate);

#[derive(Debug, Error)]
#[error("invalid date {0:?}: expected dd-mm-yyyy")]
pub struct DateError(String);

impl RunDate {
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl fmt::Display for RunDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for RunDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateError(s.to_string()))?;

        // chrono accepts unpadded fields, which would point at another directory
        if date.to_string() != s {
            return Err(DateError(s.to_string()));
        }

        Ok(date)
    }
}

pub fn feed_dir(root: &Path, date: RunDate) -> PathBuf {
    root.join(date.to_string())
}

pub fn feed_path(root: &Path, date: RunDate, name: &str) -> PathBuf {
    feed_dir(root, date).join(format!("{name}.{FEED_EXTENSION}"))
}

pub fn errors_dir(root: &Path, date: RunDate) -> PathBuf {
    root.join(date.to_string())
}

/// File name without its extension, used to name a feed's reports.
pub fn feed_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|x| x.to_string_lossy().into_owned())
}

pub fn is_feed(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|x| x == FEED_EXTENSION)
}

pub fn duplicates_path(errors_dir: &Path, stem: &str) -> PathBuf {
    errors_dir.join(format!("{stem}{DUPLICATES_SUFFIX}"))
}

pub fn mismatches_path(errors_dir: &Path, stem: &str) -> PathBuf {
    errors_dir.join(format!("{stem}{MISMATCHES_SUFFIX}"))
}
