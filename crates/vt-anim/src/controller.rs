//! The `AnimationController` — advances the vehicle along the loaded route.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use vt_core::{Bearing, Coordinate, Status, TrackerConfig, TrackerError, TrackerResult};
use vt_route::{Route, RouteStore};

use crate::{AnimationState, PeriodicTimer, TrackerObserver};

/// Timer-driven state machine over a [`RouteStore`].
///
/// The controller owns the route cursor and the vehicle's last known
/// position and heading.  Every user-visible effect goes out through the
/// [`TrackerObserver`] passed to each call.
pub struct AnimationController {
    state:    AnimationState,
    store:    RouteStore,
    timer:    PeriodicTimer,
    /// Last position shown for the vehicle, from any source.
    position: Coordinate,
    /// Last computed glyph bearing; kept when a tick has no next point.
    heading:  Option<Bearing>,
    /// Pan the map along with every tick.
    follow:   bool,
}

impl AnimationController {
    /// Create an idle controller with the vehicle at `home`.
    pub fn new(home: Coordinate, period: Duration) -> Self {
        Self {
            state:    AnimationState::Idle,
            store:    RouteStore::new(),
            timer:    PeriodicTimer::new(period),
            position: home,
            heading:  None,
            follow:   true,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        let mut ctl = Self::new(config.default_center, config.tick_period());
        ctl.follow = config.follow_vehicle;
        ctl
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    #[inline]
    pub fn route(&self) -> Option<&Route> {
        self.store.route()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> Option<Bearing> {
        self.heading
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.timer.period()
    }

    /// When the next tick is due, or `None` if nothing is scheduled.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    // ── Route handling ────────────────────────────────────────────────────

    /// Replace the active route.  The cursor rewinds; the state is left
    /// alone, so callers normally follow up with [`reset`](Self::reset).
    pub fn load_route(&mut self, route: Route) {
        debug!(points = route.len(), "route loaded");
        self.store.load(route);
    }

    /// Drop the active route.
    ///
    /// A running timer is not touched here: the next tick notices the
    /// missing route and stops.
    pub fn clear_route(&mut self) {
        self.store.clear();
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Begin or resume animating.
    ///
    /// A no-op if already running.  Routes with fewer than two points are
    /// rejected with [`TrackerError::EmptyRoute`] and leave the state as it
    /// was.
    pub fn start<O: TrackerObserver>(&mut self, now: Instant, obs: &mut O) -> TrackerResult<()> {
        if self.state.is_running() {
            return Ok(());
        }
        if !self.store.route().is_some_and(Route::is_animatable) {
            return Err(TrackerError::EmptyRoute(self.store.len()));
        }

        self.state = AnimationState::Running;
        self.timer.arm(now);
        debug!(cursor = self.store.cursor(), period_ms = self.period().as_millis() as u64, "animation started");
        obs.on_status(Status::ANIMATING);
        Ok(())
    }

    /// Pause a running animation, keeping the cursor.  Returns `false` if
    /// it was not running.
    pub fn stop<O: TrackerObserver>(&mut self, obs: &mut O) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.timer.cancel();
        self.state = AnimationState::Paused;
        debug!(cursor = self.store.cursor(), "animation paused");
        obs.on_status(Status::PAUSED);
        true
    }

    /// Return to `Idle` from any state.
    ///
    /// The cursor rewinds and the marker goes to the route's first point,
    /// or stays at the last known position when no route is loaded.
    pub fn reset<O: TrackerObserver>(&mut self, obs: &mut O) {
        self.timer.cancel();
        self.store.reset();
        self.state = AnimationState::Idle;

        if let Some(start) = self.store.route().and_then(Route::first) {
            self.position = start;
        }
        obs.on_position(self.position, self.heading);
        obs.on_pan(self.position, None);
        obs.on_status(Status::READY);
    }

    /// Change the tick period.  While running, the schedule restarts from
    /// `now` so the new period applies to the very next tick.
    pub fn set_period(&mut self, period: Duration, now: Instant) {
        self.timer.set_period(period, now);
        debug!(period_ms = period.as_millis() as u64, running = self.state.is_running(), "tick period changed");
    }

    /// Move the vehicle without animating (live updates, initial fix).
    pub fn place<O: TrackerObserver>(&mut self, position: Coordinate, obs: &mut O) {
        self.position = position;
        obs.on_position(position, self.heading);
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Run one tick if the timer is due at `now`.  Returns whether it did.
    pub fn on_tick<O: TrackerObserver>(&mut self, now: Instant, obs: &mut O) -> bool {
        if !self.state.is_running() || !self.timer.fire(now) {
            return false;
        }
        self.step(obs);
        true
    }

    fn step<O: TrackerObserver>(&mut self, obs: &mut O) {
        if !self.store.is_loaded() {
            warn!("route cleared during animation; stopping timer");
            self.timer.cancel();
            self.state = AnimationState::Idle;
            obs.on_status(Status::READY);
            return;
        }

        let Some(current) = self.store.current() else {
            self.timer.cancel();
            self.state = AnimationState::Finished;
            debug!(points = self.store.len(), "animation finished");
            obs.on_status(Status::FINISHED);
            return;
        };

        if let Some(next) = self.store.peek_next() {
            self.heading = Some(current.bearing_to(next));
        }
        self.position = current;
        obs.on_position(current, self.heading);
        if self.follow {
            obs.on_pan(current, None);
        }
        self.store.advance();
    }
}
