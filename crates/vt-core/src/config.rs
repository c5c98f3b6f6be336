//! Tracker configuration.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and handed to the session builder.  Every field has a
//! default, so a partial file only overrides what it names.

use std::time::Duration;

use crate::{Coordinate, Mode, TrackerError, TrackerResult};

/// Dataset identifiers for the two historical modes.
///
/// The identifiers are opaque to the core; the historical data source
/// decides what they mean (file names, URLs, …).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DatasetConfig {
    pub yesterday: String,
    pub week:      String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            yesterday: "dummy-route-data.json".to_owned(),
            week:      "this-week-route-data.json".to_owned(),
        }
    }
}

/// Top-level tracker configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Vehicle and map position before any source reports one.
    pub default_center: Coordinate,

    /// Zoom level used when the map is re-centred on a search result.
    pub default_zoom: u8,

    /// Initial animation tick period in milliseconds.  Must be positive.
    pub tick_period_ms: u64,

    /// Mode armed when the session starts.
    pub initial_mode: Mode,

    /// Pan the map to the vehicle on every animation tick.
    pub follow_vehicle: bool,

    pub datasets: DatasetConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(18.5204, 73.8567),
            default_zoom:   15,
            tick_period_ms: 200,
            initial_mode:   Mode::InteractiveToday,
            follow_vehicle: true,
            datasets:       DatasetConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Check invariants that the type system does not enforce.
    pub fn validate(&self) -> TrackerResult<()> {
        validate_period_ms(self.tick_period_ms)?;
        if self.datasets.yesterday.trim().is_empty() || self.datasets.week.trim().is_empty() {
            return Err(TrackerError::Config("dataset identifiers must not be empty".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Dataset identifier backing `mode`, or `None` for non-historical modes.
    pub fn dataset_for(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::HistoricalYesterday => Some(self.datasets.yesterday.as_str()),
            Mode::HistoricalWeek      => Some(self.datasets.week.as_str()),
            Mode::Live | Mode::InteractiveToday => None,
        }
    }
}

/// Tick periods are positive whole milliseconds.
pub fn validate_period_ms(ms: u64) -> TrackerResult<Duration> {
    if ms == 0 {
        return Err(TrackerError::Config("tick period must be at least 1 ms".into()));
    }
    Ok(Duration::from_millis(ms))
}
