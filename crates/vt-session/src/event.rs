//! Messages into and out of a running session.

use vt_core::{Bearing, Coordinate, Mode, Status};

/// A user action, delivered to the session through a
/// [`SessionHandle`](crate::SessionHandle).
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Start or resume the animation.
    Start,
    /// Pause the animation.
    Stop,
    /// Rewind to the start of the route.
    Reset,
    /// Change the tick period, in milliseconds.  Zero is rejected.
    SetSpeed(u64),
    SelectMode(Mode),
    /// Geocode a place name and route to it.
    Search(String),
    /// Route from the vehicle to a clicked point.
    MapClick(Coordinate),
    /// Open the vehicle popup.
    MarkerClicked,
    /// Tear down the active source and leave the event loop.
    Shutdown,
}

/// Something the user should see, published on the session's broadcast
/// stream.
#[derive(Clone, Debug, PartialEq)]
pub enum TrackerEvent {
    /// The vehicle moved.  `heading` is absent until a bearing is known.
    Position {
        position: Coordinate,
        heading:  Option<Bearing>,
    },
    Status(Status),
    Alert(String),
    ModeChanged(Mode),
    /// A route was installed; `points` is its length.
    RouteLoaded { points: usize },
}
