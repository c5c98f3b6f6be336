//! Tracking modes — which upstream source feeds the vehicle.

use std::fmt;
use std::str::FromStr;

use crate::TrackerError;

/// The four mutually exclusive data sources.  Exactly one is active per
/// session.
///
/// The string forms (`live`, `yesterday`, `week`, `today`) match the values
/// of the mode selector in the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Continuous positions from the live location provider.
    #[cfg_attr(feature = "serde", serde(rename = "live"))]
    Live,
    /// Yesterday's recorded route, animated on demand.
    #[cfg_attr(feature = "serde", serde(rename = "yesterday"))]
    HistoricalYesterday,
    /// This week's recorded route, animated on demand.
    #[cfg_attr(feature = "serde", serde(rename = "week"))]
    HistoricalWeek,
    /// Routes computed towards a destination chosen on the map or by search.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "today"))]
    InteractiveToday,
}

impl Mode {
    pub const ALL: [Mode; 4] = [
        Mode::Live,
        Mode::HistoricalYesterday,
        Mode::HistoricalWeek,
        Mode::InteractiveToday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Live                => "live",
            Mode::HistoricalYesterday => "yesterday",
            Mode::HistoricalWeek      => "week",
            Mode::InteractiveToday    => "today",
        }
    }

    #[inline]
    pub fn is_historical(self) -> bool {
        matches!(self, Mode::HistoricalYesterday | Mode::HistoricalWeek)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "live"      => Ok(Mode::Live),
            "yesterday" => Ok(Mode::HistoricalYesterday),
            "week"      => Ok(Mode::HistoricalWeek),
            "today"     => Ok(Mode::InteractiveToday),
            other => Err(TrackerError::Parse(format!(
                "invalid mode {other:?}: expected \"live\", \"yesterday\", \"week\" or \"today\""
            ))),
        }
    }
}
