use std::collections::HashMap;

use crate::{geohash, Feed};

/// A station whose `site_id` is not the geohash of its own coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub site_id: String,
    pub actual_geohash: String,
    pub lat: f64,
    pub lon: f64,
}

/// How many times each `site_id` appears in a feed, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateTally {
    index: HashMap<String, usize>,
    counts: Vec<(String, usize)>,
}

impl DuplicateTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, site_id: &str) {
        if let Some(&i) = self.index.get(site_id) {
            self.counts[i].1 += 1;
        } else {
            self.index.insert(site_id.to_string(), self.counts.len());
            self.counts.push((site_id.to_string(), 1));
        }
    }

    pub fn count(&self, site_id: &str) -> usize {
        self.index.get(site_id).map_or(0, |&i| self.counts[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(id, count)| (id.as_str(), *count))
    }

    pub fn duplicates(&self) -> impl Iterator<Item = (&str, usize)> {
        self.iter().filter(|(_, count)| *count > 1)
    }

    /// Number of distinct ids that appear more than once.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates().count()
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub mismatches: Vec<Mismatch>,
    pub tally: DuplicateTally,
    pub total: usize,
}

impl Comparison {
    /// Share of stations with a mismatched geohash, 0.0 for an empty feed.
    pub fn discrepancy_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.mismatches.len() as f64 / self.total as f64 * 100.0
    }
}

/// Recomputes every station's geohash and tallies declared ids.
pub fn compare(feed: &Feed, precision: usize) -> Comparison {
    let mut mismatches = Vec::new();
    let mut tally = DuplicateTally::new();

    for station in &feed.stations {
        let actual = geohash::encode(station.point, precision);
        if station.site_id != actual {
            mismatches.push(Mismatch {
                site_id: station.site_id.clone(),
                actual_geohash: actual,
                lat: station.lat(),
                lon: station.lon(),
            });
        }

        tally.record(&station.site_id);
    }

    Comparison {
        mismatches,
        tally,
        total: feed.len(),
    }
}
