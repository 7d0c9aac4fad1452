use std::{fs::read_to_string, path::Path};

use geo::Point;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One retailer's stations for one day, in the order the retailer listed them.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    pub stations: Vec<Station>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub site_id: String,
    pub point: Point,
}

impl Station {
    pub fn new(site_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            site_id: site_id.into(),
            point: Point::new(lon, lat),
        }
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed feed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("station #{index} ({site_id}): {field} is not a number: {value}")]
    Coordinate {
        index: usize,
        site_id: String,
        field: &'static str,
        value: String,
    },
}

impl Feed {
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        Self::parse(&read_to_string(path)?)
    }

    pub fn parse(json: &str) -> Result<Self, FeedError> {
        let raw: RawFeed = serde_json::from_str(json)?;

        let mut stations = Vec::with_capacity(raw.stations.len());
        for (index, x) in raw.stations.into_iter().enumerate() {
            let coordinate = |field: &'static str, value: RawCoordinate| {
                value.refine().map_err(|value| FeedError::Coordinate {
                    index,
                    site_id: x.site_id.clone(),
                    field,
                    value,
                })
            };
            let lat = coordinate("latitude", x.location.latitude)?;
            let lon = coordinate("longitude", x.location.longitude)?;

            stations.push(Station::new(x.site_id, lat, lon));
        }

        Ok(Self { stations })
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

#[derive(Deserialize)]
struct RawFeed {
    stations: Vec<RawStation>,
}

#[derive(Deserialize)]
struct RawStation {
    site_id: String,
    location: RawLocation,
}

#[derive(Deserialize)]
struct RawLocation {
    latitude: RawCoordinate,
    longitude: RawCoordinate,
}

// retailers publish coordinates both as numbers and as strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Number(f64),
    Text(String),
    Other(Value),
}

impl RawCoordinate {
    fn refine(self) -> Result<f64, String> {
        match self {
            Self::Number(x) => Ok(x),
            Self::Text(x) => x.trim().parse().map_err(|_| format!("{x:?}")),
            Self::Other(x) => Err(x.to_string()),
        }
    }
}
