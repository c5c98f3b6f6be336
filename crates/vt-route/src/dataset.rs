//! Historical dataset parsers.
//!
//! # JSON format
//!
//! An array of objects; extra fields are ignored.
//!
//! ```json
//! [
//!   { "latitude": 18.5204, "longitude": 73.8567 },
//!   { "latitude": 18.5210, "longitude": 73.8575, "timestamp": "08:01" }
//! ]
//! ```
//!
//! # CSV format
//!
//! ```csv
//! latitude,longitude
//! 18.5204,73.8567
//! 18.5210,73.8575
//! ```
//!
//! Both parsers reject out-of-range or non-finite coordinates with
//! [`RouteError::InvalidPoint`].  An empty dataset parses to an empty route;
//! whether that is acceptable is the caller's decision.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use vt_core::Coordinate;

use crate::{Route, RouteError, RouteResult};

// ── Record ────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PointRecord {
    latitude:  f64,
    longitude: f64,
}

impl PointRecord {
    fn into_coordinate(self, index: usize) -> RouteResult<Coordinate> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if !valid {
            return Err(RouteError::InvalidPoint {
                index,
                latitude:  self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(Coordinate::new(self.latitude, self.longitude))
    }
}

fn into_route(records: impl IntoIterator<Item = RouteResult<PointRecord>>) -> RouteResult<Route> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, r)| r.and_then(|p| p.into_coordinate(i)))
        .collect::<RouteResult<Vec<_>>>()
        .map(Route::new)
}

// ── Formats ───────────────────────────────────────────────────────────────────

/// On-disk encoding of a dataset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Csv,
}

impl DatasetFormat {
    /// Pick a format from the file extension (`.json` / `.csv`, any case).
    pub fn from_path(path: &Path) -> RouteResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(DatasetFormat::Json),
            Some("csv")  => Ok(DatasetFormat::Csv),
            _ => Err(RouteError::Format(path.display().to_string())),
        }
    }

    /// Parse a dataset in this format from any `Read` source.
    pub fn parse<R: Read>(self, reader: R) -> RouteResult<Route> {
        match self {
            DatasetFormat::Json => parse_json_reader(reader),
            DatasetFormat::Csv  => parse_csv_reader(reader),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse a JSON dataset from any `Read` source.
pub fn parse_json_reader<R: Read>(reader: R) -> RouteResult<Route> {
    let records: Vec<PointRecord> = serde_json::from_reader(reader)?;
    into_route(records.into_iter().map(Ok))
}

/// Parse a JSON dataset already held in memory.
pub fn parse_json_str(s: &str) -> RouteResult<Route> {
    parse_json_reader(s.as_bytes())
}

/// Parse a CSV dataset from any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn parse_csv_reader<R: Read>(reader: R) -> RouteResult<Route> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    into_route(
        csv_reader
            .deserialize::<PointRecord>()
            .map(|r| r.map_err(RouteError::from)),
    )
}
