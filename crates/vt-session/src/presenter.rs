//! The `Presenter` — turns observer callbacks into map updates and events.

use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use vt_anim::{AnimationController, TrackerObserver};
use vt_core::{Bearing, Coordinate, Mode, Status};
use vt_route::Route;

use crate::{MapView, PopupContent, TrackerEvent};

/// Capacity of the event broadcast channel.  Slow subscribers that fall
/// further behind than this see `RecvError::Lagged`.
pub const EVENT_CAPACITY: usize = 256;

/// Observer that drives a [`MapView`] and publishes [`TrackerEvent`]s.
///
/// Also keeps what the vehicle popup shows, and refreshes the popup on
/// every change while it is open.
pub struct Presenter<V: MapView> {
    view:     V,
    events:   broadcast::Sender<TrackerEvent>,
    position: Option<Coordinate>,
    moving:   bool,
    period:   Duration,
}

impl<V: MapView> Presenter<V> {
    pub fn new(view: V, period: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { view, events, position: None, moving: false, period }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Sender side of the event stream, for handing out subscriptions.
    pub fn events(&self) -> &broadcast::Sender<TrackerEvent> {
        &self.events
    }

    /// Current popup content.
    pub fn popup(&self) -> PopupContent {
        PopupContent::now(self.position, self.moving, self.period)
    }

    /// Open the vehicle popup.
    pub fn open_popup(&mut self) {
        let content = self.popup();
        debug!(%content, "popup opened");
        self.view.show_popup(&content);
    }

    /// Pick up animation state that changes without a callback (a period
    /// change, or a run that ended on a cleared route).
    pub fn sync(&mut self, anim: &AnimationController) {
        let moving = anim.state().is_running();
        let period = anim.period();
        if moving != self.moving || period != self.period {
            self.moving = moving;
            self.period = period;
            self.refresh_popup();
        }
    }

    fn refresh_popup(&mut self) {
        if self.view.is_popup_open() {
            let content = self.popup();
            self.view.show_popup(&content);
        }
    }

    fn publish(&self, event: TrackerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl<V: MapView> TrackerObserver for Presenter<V> {
    fn on_position(&mut self, position: Coordinate, heading: Option<Bearing>) {
        self.position = Some(position);
        self.view.set_marker_position(position);
        if let Some(h) = heading {
            self.view.set_marker_heading(h.rotation());
        }
        self.publish(TrackerEvent::Position { position, heading });
        self.refresh_popup();
    }

    fn on_pan(&mut self, center: Coordinate, zoom: Option<u8>) {
        self.view.pan_to(center, zoom);
    }

    fn on_status(&mut self, status: Status) {
        debug!(status = status.text, "status");
        self.moving = status.is_active();
        self.view.show_status(status);
        self.publish(TrackerEvent::Status(status));
        self.refresh_popup();
    }

    fn on_alert(&mut self, message: &str) {
        warn!(alert = message, "user alert");
        self.view.show_alert(message);
        self.publish(TrackerEvent::Alert(message.to_owned()));
    }

    fn on_mode_changed(&mut self, mode: Mode) {
        self.publish(TrackerEvent::ModeChanged(mode));
    }

    fn on_route_loaded(&mut self, route: &Route) {
        debug!(points = route.len(), "drawing route");
        self.view.draw_route(route);
        self.publish(TrackerEvent::RouteLoaded { points: route.len() });
    }
}
