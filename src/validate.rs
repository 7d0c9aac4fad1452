use std::{
    fs::read_dir,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::{
    compare,
    layout::{errors_dir, feed_dir, feed_stem, is_feed},
    report::{ensure_errors_dir, write_reports, Reports},
    Feed, FeedError, ValidateSettings,
};

/// Outcome for a feed that was read and checked.
#[derive(Debug)]
pub struct FeedReport {
    pub file: String,
    pub total: usize,
    pub mismatches: usize,
    pub duplicates: usize,
    pub reports: Reports,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub checked: Vec<FeedReport>,
    pub failed: Vec<(String, FeedError)>,
}

impl BatchSummary {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Feed files in `dir`, sorted by name.
pub fn feed_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for x in read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = x?.path();
        if is_feed(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Checks every feed fetched on `settings.date`.
///
/// A feed that can't be read or parsed is logged and skipped so the rest of
/// the batch still gets checked. Failing to write a report stops the run.
pub fn run(settings: &ValidateSettings) -> Result<BatchSummary> {
    let input = feed_dir(&settings.feed_root, settings.date);
    tracing::info!("Processing JSON files in directory: {}", input.display());

    let files = feed_files(&input)?;
    tracing::info!(
        "Processing {} files: [{}]",
        files.len(),
        files.iter().filter_map(|x| x.file_name()).map(|x| x.to_string_lossy()).join(", ")
    );

    let errors = errors_dir(&settings.errors_root, settings.date);
    if ensure_errors_dir(&errors)? {
        tracing::info!("Created errors directory: {}", errors.display());
    }

    let mut summary = BatchSummary::default();
    for path in files {
        let file = path
            .file_name()
            .map(|x| x.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!("Processing file: {file}");

        let feed = match Feed::load(&path) {
            Ok(x) => x,
            Err(e) => {
                tracing::warn!("skipping {file}: {e}");
                summary.failed.push((file, e));
                continue;
            }
        };

        let stem = feed_stem(&path).unwrap_or_else(|| file.clone());
        summary
            .checked
            .push(check_feed(&file, &stem, &feed, &errors, settings.precision)?);
    }

    Ok(summary)
}

/// Compares one feed and writes whichever reports it needs.
pub fn check_feed(
    file: &str,
    stem: &str,
    feed: &Feed,
    errors_dir: &Path,
    precision: usize,
) -> Result<FeedReport> {
    let result = compare(feed, precision);

    let duplicates = result.tally.duplicate_count();
    if duplicates > 0 {
        tracing::info!("{file}: Found {duplicates} duplicates");
    }

    if result.mismatches.is_empty() {
        tracing::info!("No geohash mismatches found in {file}");
    } else {
        tracing::info!(
            "{file}: {} out of {} stations ({:.2}%) have mismatched geohashes",
            result.mismatches.len(),
            result.total,
            result.discrepancy_percentage()
        );
    }

    let reports = write_reports(errors_dir, stem, &result.mismatches, &result.tally)?;

    Ok(FeedReport {
        file: file.to_string(),
        total: result.total,
        mismatches: result.mismatches.len(),
        duplicates,
        reports,
    })
}
