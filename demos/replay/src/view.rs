//! A `MapView` that writes to the log instead of drawing.

use tracing::{debug, info, warn};

use vt_core::{Coordinate, Status};
use vt_route::Route;
use vt_session::{MapView, PopupContent};

#[derive(Debug, Default)]
pub struct LogView {
    pub moves:  usize,
    popup_open: bool,
    zoom:       u8,
}

impl MapView for LogView {
    fn set_marker_position(&mut self, position: Coordinate) {
        self.moves += 1;
        debug!(%position, "marker");
    }

    fn set_marker_heading(&mut self, rotation_deg: f64) {
        debug!(rotation_deg, "heading");
    }

    fn pan_to(&mut self, center: Coordinate, zoom: Option<u8>) {
        if let Some(z) = zoom {
            self.zoom = z;
        }
        debug!(%center, zoom = self.zoom, "pan");
    }

    fn show_popup(&mut self, content: &PopupContent) {
        self.popup_open = true;
        info!(%content, "popup");
    }

    fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    fn show_status(&mut self, status: Status) {
        info!(status = status.text, active = status.is_active(), "status");
    }

    fn show_alert(&mut self, message: &str) {
        warn!(alert = message, "alert");
    }

    fn draw_route(&mut self, route: &Route) {
        info!(
            points   = route.len(),
            length_m = route.length_m().round(),
            from     = ?route.first(),
            to       = ?route.last(),
            "route drawn"
        );
    }
}
