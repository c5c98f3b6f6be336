//! User-visible status vocabulary.
//!
//! The status indicator shows a short text plus one of three dot styles.
//! Every status the tracker can report is an associated constant here so
//! the strings live in exactly one place.

use std::fmt;

/// Style of the status dot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    #[default]
    Neutral,
    Active,
    Paused,
}

/// A status indicator value: dot style plus text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Status {
    pub kind: StatusKind,
    pub text: &'static str,
}

impl Status {
    const fn neutral(text: &'static str) -> Self {
        Self { kind: StatusKind::Neutral, text }
    }

    // ── Animation ─────────────────────────────────────────────────────────
    pub const READY:     Status = Status::neutral("Ready");
    pub const ANIMATING: Status = Status { kind: StatusKind::Active, text: "Animating" };
    pub const PAUSED:    Status = Status { kind: StatusKind::Paused, text: "Paused" };
    pub const FINISHED:  Status = Status::neutral("Finished");

    // ── Sources ───────────────────────────────────────────────────────────
    pub const TRACKING:             Status = Status::neutral("Tracking");
    pub const LOCATION_UNAVAILABLE: Status = Status::neutral("Location Unavailable");
    pub const LOADING:              Status = Status::neutral("Loading Route...");
    pub const ROUTE_LOADED:         Status = Status::neutral("Route Loaded");
    pub const LOAD_FAILED:          Status = Status::neutral("Load Failed");
    pub const SEARCHING:            Status = Status::neutral("Searching...");
    pub const ROUTE_FOUND:          Status = Status::neutral("Route Found");
    pub const NOT_FOUND:            Status = Status::neutral("Not Found");
    pub const SEARCH_ERROR:         Status = Status::neutral("Search Error");
    pub const ROUTING_ERROR:        Status = Status::neutral("Routing Error");
    pub const NO_ROUTE:             Status = Status::neutral("No route found");
    pub const ROUTE_ERROR:          Status = Status::neutral("Route Error");

    /// `true` while the vehicle is being animated.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.kind == StatusKind::Active
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::READY
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text)
    }
}
