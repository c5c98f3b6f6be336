//! The map widget seam.

use vt_core::{Coordinate, Status};
use vt_route::Route;

use crate::PopupContent;

/// What the session needs from a map widget.
///
/// Implementations wrap whatever actually draws the map.  Only the marker,
/// the camera and the popup are required; the rest default to no-ops.
pub trait MapView {
    fn set_marker_position(&mut self, position: Coordinate);

    /// Rotate the vehicle glyph.  `rotation_deg` is
    /// [`vt_core::Bearing::rotation`], glyph offset included.
    fn set_marker_heading(&mut self, rotation_deg: f64);

    /// Centre the map on `center`.  `None` keeps the current zoom.
    fn pan_to(&mut self, center: Coordinate, zoom: Option<u8>);

    /// Open the popup, or replace its content if already open.
    fn show_popup(&mut self, content: &PopupContent);

    fn is_popup_open(&self) -> bool;

    fn show_status(&mut self, _status: Status) {}

    fn show_alert(&mut self, _message: &str) {}

    fn draw_route(&mut self, _route: &Route) {}
}

/// A view that draws nothing.  The popup never opens.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessView;

impl MapView for HeadlessView {
    fn set_marker_position(&mut self, _position: Coordinate) {}
    fn set_marker_heading(&mut self, _rotation_deg: f64) {}
    fn pan_to(&mut self, _center: Coordinate, _zoom: Option<u8>) {}
    fn show_popup(&mut self, _content: &PopupContent) {}
    fn is_popup_open(&self) -> bool {
        false
    }
}

