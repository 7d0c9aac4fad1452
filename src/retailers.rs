use std::{io::Read, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// A row of the retailer record file. Other columns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Retailer {
    /// Used as the feed's file name.
    pub name: String,
    pub json_url: String,
}

pub fn load(path: &Path) -> Result<Vec<Retailer>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open retailer list {}", path.display()))?;
    read(reader)
}

pub fn parse(input: impl Read) -> Result<Vec<Retailer>> {
    read(csv::Reader::from_reader(input))
}

fn read<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Retailer>> {
    let mut retailers = Vec::new();
    for (i, x) in reader.deserialize::<Retailer>().enumerate() {
        // header is line 1
        let x = x.with_context(|| format!("Invalid retailer on line {}", i + 2))?;
        retailers.push(x);
    }
    Ok(retailers)
}
