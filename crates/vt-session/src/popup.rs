//! Vehicle status popup.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};

use vt_core::Coordinate;

/// Approximate speed for a tick period: route points are taken to be about
/// 10 m apart, one per tick.
pub fn approx_speed_kmh(period: Duration) -> f64 {
    3_600_000.0 / (period.as_millis() as f64 * 10.0)
}

/// Rendered content of the vehicle popup.
#[derive(Clone, Debug, PartialEq)]
pub struct PopupContent {
    pub date:     String,
    pub time:     String,
    /// `"lat, lon"` to 4 decimals, or `"N/A, N/A"` before any fix.
    pub position: String,
    /// km/h to 1 decimal; `"0.0"` unless moving.
    pub speed:    String,
    pub moving:   bool,
}

impl PopupContent {
    /// Content as of the local wall clock.
    pub fn now(position: Option<Coordinate>, moving: bool, period: Duration) -> Self {
        Self::at(Local::now(), position, moving, period)
    }

    pub fn at(
        now:      DateTime<Local>,
        position: Option<Coordinate>,
        moving:   bool,
        period:   Duration,
    ) -> Self {
        let position = match position {
            Some(p) => format!("{:.4}, {:.4}", p.latitude, p.longitude),
            None    => "N/A, N/A".to_owned(),
        };
        let speed = if moving {
            format!("{:.1}", approx_speed_kmh(period))
        } else {
            "0.0".to_owned()
        };
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            position,
            speed,
            moving,
        }
    }

    #[inline]
    pub fn motion(&self) -> &'static str {
        if self.moving { "Moving" } else { "Stopped" }
    }

    /// Markup for HTML-capable map widgets.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"vehicle-popup\">\
             <h3>Vehicle Status</h3>\
             <p><strong>Date:</strong> {}</p>\
             <p><strong>Time:</strong> {}</p>\
             <p><strong>Position:</strong> {}</p>\
             <p><strong>Speed:</strong> {} km/h (approx)</p>\
             <p><strong>Status:</strong> {}</p>\
             </div>",
            self.date,
            self.time,
            self.position,
            self.speed,
            self.motion(),
        )
    }
}

impl fmt::Display for PopupContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} | {} km/h | {}",
            self.date,
            self.time,
            self.position,
            self.speed,
            self.motion(),
        )
    }
}
