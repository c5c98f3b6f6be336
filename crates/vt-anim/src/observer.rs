//! Presentation callbacks.

use vt_core::{Bearing, Coordinate, Mode, Status};
use vt_route::Route;

/// Callbacks invoked by the animation and mode controllers whenever
/// something user-visible changes.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The session's presenter forwards them
/// to the map view and the event stream.
pub trait TrackerObserver {
    /// The vehicle marker moved.  `heading` is the latest known glyph
    /// bearing, `None` until one has been computed.
    fn on_position(&mut self, _position: Coordinate, _heading: Option<Bearing>) {}

    /// The map should be centred on `center`.  `zoom: None` keeps the
    /// current zoom.
    fn on_pan(&mut self, _center: Coordinate, _zoom: Option<u8>) {}

    /// The status indicator changed.
    fn on_status(&mut self, _status: Status) {}

    /// A message the user must see (failed fetch, empty search, …).
    fn on_alert(&mut self, _message: &str) {}

    /// A new mode became active.
    fn on_mode_changed(&mut self, _mode: Mode) {}

    /// A route was loaded into the store.
    fn on_route_loaded(&mut self, _route: &Route) {}
}
