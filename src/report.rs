use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    layout::{duplicates_path, mismatches_path},
    DuplicateTally, Mismatch,
};

pub const DUPLICATES_HEADER: &str = "site_id, count";
pub const MISMATCHES_HEADER: &str = "site_id (provided geohash), actual geohash, lat, lon";

/// Reports written for one feed. Either may be absent when there was nothing to report.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reports {
    pub duplicates: Option<PathBuf>,
    pub mismatches: Option<PathBuf>,
}

/// Creates the errors directory if it's missing, returning whether it had to.
pub fn ensure_errors_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create errors directory {}", dir.display()))?;
    Ok(true)
}

pub fn duplicates_csv(tally: &DuplicateTally) -> Option<String> {
    let mut duplicates = tally.duplicates().peekable();
    duplicates.peek()?;

    let mut output = format!("{DUPLICATES_HEADER}\n");
    for (site_id, count) in duplicates {
        output.push_str(&format!("{site_id}, {count}\n"));
    }
    Some(output)
}

pub fn mismatches_csv(mismatches: &[Mismatch]) -> Option<String> {
    if mismatches.is_empty() {
        return None;
    }

    let mut output = format!("{MISMATCHES_HEADER}\n");
    for x in mismatches {
        output.push_str(&format!(
            "{}, {}, {}, {}\n",
            x.site_id,
            x.actual_geohash,
            fmt_coord(x.lat),
            fmt_coord(x.lon)
        ));
    }
    Some(output)
}

/// Shortest round-trip text that keeps the decimal point on whole numbers,
/// with a signed two-digit exponent (`-5e-05`, `1e+16`) when one is needed.
pub fn fmt_coord(value: f64) -> String {
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Writes `<stem>_duplicates.csv` and `<stem>_geohash_mismatches.csv` into
/// `errors_dir` when there is something to put in them.
pub fn write_reports(
    errors_dir: &Path,
    stem: &str,
    mismatches: &[Mismatch],
    tally: &DuplicateTally,
) -> Result<Reports> {
    ensure_errors_dir(errors_dir)?;
    let mut reports = Reports::default();

    if let Some(contents) = duplicates_csv(tally) {
        let path = duplicates_path(errors_dir, stem);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        reports.duplicates = Some(path);
    }

    if let Some(contents) = mismatches_csv(mismatches) {
        let path = mismatches_path(errors_dir, stem);
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Error file written: {}", path.display());
        reports.mismatches = Some(path);
    }

    Ok(reports)
}
