//! The `ModeController` — exactly one active source at a time.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use vt_anim::{AnimationController, AnimationState, TrackerObserver};
use vt_core::{Coordinate, Mode, Status, TrackerConfig, TrackerError};
use vt_route::Route;

use crate::outcome::{Stamp, Tagged};
use crate::{Collaborators, LiveWatch, SourceEvent, SourceOutcome};

/// Alert shown when a search is submitted with a blank query.
pub const EMPTY_QUERY_ALERT: &str = "Please enter a location to search.";

/// Selects the data source that feeds the animation controller and keeps
/// the sources mutually exclusive.
///
/// All methods run on the session's event loop.  Asynchronous requests are
/// spawned onto the runtime and come back through
/// [`next_event`](Self::next_event), which the loop awaits alongside its
/// other inputs and hands to [`handle_event`](Self::handle_event).
pub struct ModeController {
    mode:        Mode,
    /// Bumped on every mode switch; outcomes from older generations are
    /// discarded.
    generation:  u64,
    /// Bumped by every new request; only the latest one may deliver.
    request:     u64,
    live:        Option<LiveWatch>,
    in_flight:   Option<JoinHandle<()>>,
    services:    Collaborators,
    config:      TrackerConfig,
    outcome_tx:  mpsc::UnboundedSender<Tagged>,
    outcome_rx:  mpsc::UnboundedReceiver<Tagged>,
}

impl ModeController {
    /// Create a controller.  No source is active until the first
    /// [`select_mode`](Self::select_mode); `mode()` reports the configured
    /// initial mode meanwhile.
    pub fn new(services: Collaborators, config: TrackerConfig) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            mode: config.initial_mode,
            generation: 0,
            request: 0,
            live: None,
            in_flight: None,
            services,
            config,
            outcome_tx,
            outcome_rx,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_watching(&self) -> bool {
        self.live.is_some()
    }

    /// `true` while a fetch / geocode / route request is outstanding.
    pub fn has_pending_request(&self) -> bool {
        self.in_flight.as_ref().is_some_and(|h| !h.is_finished())
    }

    // ── Mode switching ────────────────────────────────────────────────────

    /// Switch to `mode`: tear down the current source, reset the animation,
    /// then arm the new source.
    pub fn select_mode<O: TrackerObserver>(
        &mut self,
        mode: Mode,
        anim: &mut AnimationController,
        obs:  &mut O,
    ) {
        self.teardown();
        anim.reset(obs);
        anim.clear_route();

        info!(from = %self.mode, to = %mode, generation = self.generation, "mode switch");
        self.mode = mode;
        obs.on_mode_changed(mode);

        match mode {
            Mode::Live => match self.services.location.watch() {
                Ok(watch) => {
                    debug!(subscription = %watch.id, "live watch started");
                    self.live = Some(watch);
                    obs.on_pan(anim.position(), None);
                    obs.on_status(Status::TRACKING);
                }
                Err(e) => self.fail(e, anim, obs),
            },
            Mode::HistoricalYesterday | Mode::HistoricalWeek => {
                let dataset = self.config.dataset_for(mode).unwrap_or_default().to_owned();
                obs.on_status(Status::LOADING);
                let history = self.services.history.clone();
                self.spawn(async move {
                    let result = history.fetch(&dataset).await;
                    SourceOutcome::Dataset { dataset, result }
                });
            }
            // Waits for a map click or a search.
            Mode::InteractiveToday => {}
        }
    }

    /// Cancel the live subscription and abort any outstanding request.
    /// Idempotent.
    pub fn teardown(&mut self) {
        self.generation += 1;
        if let Some(watch) = self.live.take() {
            debug!(subscription = %watch.id, "cancelling live watch");
            self.services.location.cancel(watch.id);
        }
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    // ── Interactive routing ───────────────────────────────────────────────

    /// Route from the vehicle to a clicked map point.  Ignored outside
    /// `InteractiveToday`.
    pub fn map_click<O: TrackerObserver>(
        &mut self,
        destination: Coordinate,
        anim:        &mut AnimationController,
        obs:         &mut O,
    ) {
        if self.mode != Mode::InteractiveToday {
            debug!(mode = %self.mode, "map click ignored outside interactive mode");
            return;
        }
        self.request_route(vec![anim.position(), destination], false, anim, obs);
    }

    /// Look up `query` and route to it.  Ignored outside `InteractiveToday`.
    pub fn search<O: TrackerObserver>(&mut self, query: &str, obs: &mut O) {
        let query = query.trim();
        if query.is_empty() {
            obs.on_alert(EMPTY_QUERY_ALERT);
            return;
        }
        if self.mode != Mode::InteractiveToday {
            debug!(mode = %self.mode, query, "search ignored outside interactive mode");
            return;
        }

        obs.on_status(Status::SEARCHING);
        let geocoder = self.services.geocoder.clone();
        let query    = query.to_owned();
        self.spawn(async move {
            let result = geocoder.geocode(&query).await;
            SourceOutcome::Geocoded { query, result }
        });
    }

    /// Ask the routing collaborator for a path through `waypoints`.
    ///
    /// The current route is cleared first, so a failed or slow request never
    /// leaves a stale route behind.
    pub fn request_route<O: TrackerObserver>(
        &mut self,
        waypoints:   Vec<Coordinate>,
        from_search: bool,
        anim:        &mut AnimationController,
        obs:         &mut O,
    ) {
        anim.clear_route();
        self.supersede();
        if waypoints.len() < 2 {
            self.fail(TrackerError::InsufficientWaypoints(waypoints.len()), anim, obs);
            return;
        }

        let routing = self.services.routing.clone();
        self.spawn(async move {
            let result = routing.route(&waypoints).await;
            SourceOutcome::Routed { result, from_search }
        });
    }

    /// Ask the location provider for a one-shot fix.  The request survives
    /// mode switches.
    pub fn request_initial_fix(&self) {
        let location = self.services.location.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = SourceOutcome::InitialFix(location.current_position().await);
            // Receiver gone means the session ended.
            let _ = tx.send(Tagged { stamp: Stamp::Detached, outcome });
        });
    }

    // ── Event intake ──────────────────────────────────────────────────────

    /// Wait for the next live update or current-generation outcome.
    ///
    /// Cancel-safe: both inputs are channel receives, so losing a
    /// `select!` race never drops an event.
    pub async fn next_event(&mut self) -> SourceEvent {
        let (current, latest) = (self.generation, self.request);
        loop {
            tokio::select! {
                Some(tagged) = self.outcome_rx.recv() => {
                    match tagged.stamp {
                        Stamp::Request { generation, request }
                            if generation != current || request != latest =>
                        {
                            debug!(generation, request, current, latest, "discarding superseded outcome");
                        }
                        _ => return SourceEvent::Outcome(tagged.outcome),
                    }
                }
                update = recv_live(&mut self.live) => return SourceEvent::Live(update),
            }
        }
    }

    /// Apply an event from [`next_event`](Self::next_event).
    pub fn handle_event<O: TrackerObserver>(
        &mut self,
        event: SourceEvent,
        anim:  &mut AnimationController,
        obs:   &mut O,
    ) {
        match event {
            SourceEvent::Live(Ok(position)) => anim.place(position, obs),
            SourceEvent::Live(Err(e)) => {
                warn!(error = %e, "live location failed");
                if let Some(watch) = self.live.take() {
                    self.services.location.cancel(watch.id);
                }
                self.fail(e, anim, obs);
            }
            SourceEvent::Outcome(outcome) => self.handle_outcome(outcome, anim, obs),
        }
    }

    fn handle_outcome<O: TrackerObserver>(
        &mut self,
        outcome: SourceOutcome,
        anim:    &mut AnimationController,
        obs:     &mut O,
    ) {
        match outcome {
            SourceOutcome::Dataset { dataset, result } => match result {
                Ok(route) if route.is_empty() => {
                    warn!(dataset = %dataset, "historical dataset is empty");
                    obs.on_status(Status::LOAD_FAILED);
                }
                Ok(route) => {
                    self.install(route, anim, obs);
                    obs.on_status(Status::ROUTE_LOADED);
                }
                Err(e) => {
                    warn!(dataset = %dataset, error = %e, "historical fetch failed");
                    let e = match e {
                        e @ TrackerError::FetchFailed(_) => e,
                        other => TrackerError::FetchFailed(other.to_string()),
                    };
                    self.fail(e, anim, obs);
                }
            },

            SourceOutcome::Geocoded { query, result } => match result {
                Ok(destination) => {
                    debug!(query = %query, %destination, "geocoded");
                    obs.on_pan(destination, Some(self.config.default_zoom));
                    self.request_route(vec![anim.position(), destination], true, anim, obs);
                }
                Err(e @ TrackerError::NotFound(_)) => self.fail(e, anim, obs),
                Err(e) => {
                    warn!(query = %query, error = %e, "search failed");
                    obs.on_alert(&format!("Failed to search for location: {e}"));
                    obs.on_status(Status::SEARCH_ERROR);
                }
            },

            SourceOutcome::Routed { result, from_search } => match result {
                Ok(route) if route.is_empty() => {
                    warn!("routing returned no coordinates");
                    obs.on_status(Status::NO_ROUTE);
                }
                Ok(route) => {
                    self.install(route, anim, obs);
                    if from_search {
                        obs.on_status(Status::ROUTE_FOUND);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "routing failed");
                    self.fail(e, anim, obs);
                }
            },

            SourceOutcome::InitialFix(result) => match result {
                Ok(position) if !anim.state().is_running() => {
                    debug!(%position, "initial fix");
                    anim.place(position, obs);
                    obs.on_pan(position, Some(self.config.default_zoom));
                }
                Ok(_) => debug!("initial fix ignored while animating"),
                Err(e) => warn!(error = %e, "initial fix unavailable; keeping default centre"),
            },
        }
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// Load `route` and reset onto its first point.  Never auto-starts.
    fn install<O: TrackerObserver>(
        &mut self,
        route: Route,
        anim:  &mut AnimationController,
        obs:   &mut O,
    ) {
        info!(mode = %self.mode, points = route.len(), length_m = route.length_m().round(), "route installed");
        obs.on_route_loaded(&route);
        anim.load_route(route);
        anim.reset(obs);
    }

    /// Report `e` to the user and settle in `Idle`.
    fn fail<O: TrackerObserver>(
        &mut self,
        e:    TrackerError,
        anim: &mut AnimationController,
        obs:  &mut O,
    ) {
        if anim.state() != AnimationState::Idle {
            anim.reset(obs);
        }
        obs.on_alert(&e.alert());
        obs.on_status(e.status());
    }

    /// Run `fut` on the runtime as this generation's outstanding request,
    /// superseding any previous one.
    fn spawn<F>(&mut self, fut: F)
    where
        F: Future<Output = SourceOutcome> + Send + 'static,
    {
        self.supersede();
        let tx    = self.outcome_tx.clone();
        let stamp = Stamp::Request { generation: self.generation, request: self.request };
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = fut.await;
            let _ = tx.send(Tagged { stamp, outcome });
        }));
    }

    /// Invalidate the outstanding request, including a result it has
    /// already queued.
    fn supersede(&mut self) {
        self.request += 1;
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
    }
}

impl Drop for ModeController {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn recv_live(live: &mut Option<LiveWatch>) -> vt_core::TrackerResult<Coordinate> {
    match live {
        Some(watch) => match watch.updates.recv().await {
            Some(update) => update,
            None => Err(TrackerError::SourceUnavailable("location stream closed".into())),
        },
        None => std::future::pending().await,
    }
}
