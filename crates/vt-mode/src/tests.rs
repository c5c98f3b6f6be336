//! Unit tests for vt-mode.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use vt_anim::{AnimationController, AnimationState, TrackerObserver};
use vt_core::{Bearing, Coordinate, Mode, Status, TrackerConfig, TrackerError, TrackerResult};
use vt_route::Route;

use crate::{
    Collaborators, Geocoder, HistoricalSource, LiveWatch, LocationProvider, ModeController,
    RoutingService, StraightLineRouter, SubscriptionId, EMPTY_QUERY_ALERT,
};

// ── Fakes ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct FakeLocation {
    unavailable: bool,
    next_id:     AtomicU64,
    cancels:     Mutex<Vec<SubscriptionId>>,
    sender:      Mutex<Option<mpsc::Sender<TrackerResult<Coordinate>>>>,
    fix:         Option<Coordinate>,
}

impl FakeLocation {
    fn cancel_count(&self) -> usize {
        self.cancels.lock().unwrap().len()
    }

    async fn push(&self, update: TrackerResult<Coordinate>) {
        let tx = self.sender.lock().unwrap().clone().expect("no active watch");
        tx.send(update).await.unwrap();
    }
}

#[async_trait]
impl LocationProvider for FakeLocation {
    fn watch(&self) -> TrackerResult<LiveWatch> {
        if self.unavailable {
            return Err(TrackerError::SourceUnavailable("permission denied".into()));
        }
        let (tx, updates) = mpsc::channel(16);
        *self.sender.lock().unwrap() = Some(tx);
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(LiveWatch { id, updates })
    }

    fn cancel(&self, id: SubscriptionId) {
        self.cancels.lock().unwrap().push(id);
    }

    async fn current_position(&self) -> TrackerResult<Coordinate> {
        self.fix.ok_or_else(|| TrackerError::SourceUnavailable("no fix".into()))
    }
}

#[derive(Default)]
struct ScriptedHistory {
    datasets: HashMap<String, TrackerResult<Route>>,
}

#[async_trait]
impl HistoricalSource for ScriptedHistory {
    async fn fetch(&self, dataset: &str) -> TrackerResult<Route> {
        self.datasets
            .get(dataset)
            .cloned()
            .unwrap_or_else(|| Err(TrackerError::FetchFailed("HTTP 404".into())))
    }
}

struct ScriptedGeocoder;

#[async_trait]
impl Geocoder for ScriptedGeocoder {
    async fn geocode(&self, query: &str) -> TrackerResult<Coordinate> {
        match query {
            "station" => Ok(Coordinate::new(18.5289, 73.8744)),
            "offline" => Err(TrackerError::FetchFailed("network down".into())),
            other     => Err(TrackerError::NotFound(other.to_owned())),
        }
    }
}

struct NoPathRouter;

#[async_trait]
impl RoutingService for NoPathRouter {
    async fn route(&self, _waypoints: &[Coordinate]) -> TrackerResult<Route> {
        Err(TrackerError::RoutingFailed("no path".into()))
    }
}

/// Routes only to `reachable`; every other destination has no path.
struct OneWayRouter {
    reachable: Coordinate,
}

#[async_trait]
impl RoutingService for OneWayRouter {
    async fn route(&self, waypoints: &[Coordinate]) -> TrackerResult<Route> {
        match waypoints.last() {
            Some(&dest) if dest == self.reachable => Ok(Route::new(waypoints.to_vec())),
            _ => Err(TrackerError::RoutingFailed("no path".into())),
        }
    }
}

#[derive(Default)]
struct Recorder {
    statuses:  Vec<Status>,
    alerts:    Vec<String>,
    pans:      Vec<(Coordinate, Option<u8>)>,
    modes:     Vec<Mode>,
    loaded:    Vec<usize>,
    positions: Vec<Coordinate>,
}

impl TrackerObserver for Recorder {
    fn on_position(&mut self, position: Coordinate, _heading: Option<Bearing>) {
        self.positions.push(position);
    }
    fn on_pan(&mut self, center: Coordinate, zoom: Option<u8>) {
        self.pans.push((center, zoom));
    }
    fn on_status(&mut self, status: Status) {
        self.statuses.push(status);
    }
    fn on_alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
    fn on_mode_changed(&mut self, mode: Mode) {
        self.modes.push(mode);
    }
    fn on_route_loaded(&mut self, route: &Route) {
        self.loaded.push(route.len());
    }
}

// ── Rig ───────────────────────────────────────────────────────────────────────

const YESTERDAY: &str = "yesterday.json";
const WEEK: &str = "week.json";

struct Rig {
    modes:    ModeController,
    anim:     AnimationController,
    obs:      Recorder,
    location: Arc<FakeLocation>,
}

impl Rig {
    fn new(history: ScriptedHistory, routing: Arc<dyn RoutingService>, location: FakeLocation) -> Self {
        let mut config = TrackerConfig::default();
        config.datasets.yesterday = YESTERDAY.into();
        config.datasets.week      = WEEK.into();

        let location = Arc::new(location);
        let services = Collaborators {
            routing,
            geocoder: Arc::new(ScriptedGeocoder),
            history:  Arc::new(history),
            location: location.clone(),
        };
        Self {
            modes: ModeController::new(services, config.clone()),
            anim:  AnimationController::from_config(&config),
            obs:   Recorder::default(),
            location,
        }
    }

    fn standard() -> Self {
        let mut history = ScriptedHistory::default();
        history.datasets.insert(YESTERDAY.into(), Ok(line(3)));
        history.datasets.insert(WEEK.into(), Ok(line(5)));
        // Huge spacing: one step per leg, so routes equal their waypoints.
        Self::new(history, Arc::new(StraightLineRouter::new(1e9)), FakeLocation::default())
    }

    fn select(&mut self, mode: Mode) {
        self.modes.select_mode(mode, &mut self.anim, &mut self.obs);
    }

    /// Await one source event and apply it.
    async fn pump(&mut self) {
        let event = self.modes.next_event().await;
        self.modes.handle_event(event, &mut self.anim, &mut self.obs);
    }

    fn last_status(&self) -> Option<Status> {
        self.obs.statuses.last().copied()
    }
}

fn line(n: usize) -> Route {
    (0..n).map(|i| Coordinate::new(18.52, 73.85 + i as f64 * 0.001)).collect()
}

// ── Mode switching ────────────────────────────────────────────────────────────

#[cfg(test)]
mod switching {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn live_to_week_cancels_watch_exactly_once() {
        let mut rig = Rig::standard();
        rig.select(Mode::Live);
        assert!(rig.modes.is_watching());
        assert_eq!(rig.last_status(), Some(Status::TRACKING));

        let fix = Coordinate::new(18.53, 73.86);
        rig.location.push(Ok(fix)).await;
        rig.pump().await;
        assert_eq!(rig.anim.position(), fix);

        rig.select(Mode::HistoricalWeek);
        assert_eq!(rig.location.cancel_count(), 1);
        assert!(!rig.modes.is_watching());
        assert_eq!(rig.anim.state(), AnimationState::Idle);
        assert_eq!(rig.anim.cursor(), 0);
        assert_eq!(rig.last_status(), Some(Status::LOADING));

        rig.pump().await;
        assert_eq!(rig.anim.route().map(Route::len), Some(5));
        assert_eq!(rig.last_status(), Some(Status::ROUTE_LOADED));
        assert_eq!(rig.anim.state(), AnimationState::Idle);

        rig.select(Mode::InteractiveToday);
        assert_eq!(rig.location.cancel_count(), 1);
        assert_eq!(rig.obs.modes, vec![Mode::Live, Mode::HistoricalWeek, Mode::InteractiveToday]);
    }

    #[tokio::test(start_paused = true)]
    async fn switch_resets_running_animation_and_clears_route() {
        let mut rig = Rig::standard();
        rig.select(Mode::HistoricalYesterday);
        rig.pump().await;
        rig.anim.start(tokio::time::Instant::now(), &mut rig.obs).unwrap();

        rig.select(Mode::InteractiveToday);
        assert_eq!(rig.anim.state(), AnimationState::Idle);
        assert!(rig.anim.route().is_none());
        assert_eq!(rig.anim.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_dataset_reports_load_failed_and_drops_old_route() {
        let mut history = ScriptedHistory::default();
        history.datasets.insert(YESTERDAY.into(), Ok(line(3)));
        history.datasets.insert(WEEK.into(), Ok(Route::empty()));
        let mut rig = Rig::new(history, Arc::new(StraightLineRouter::default()), FakeLocation::default());

        rig.select(Mode::HistoricalYesterday);
        rig.pump().await;
        assert!(rig.anim.route().is_some());

        rig.select(Mode::HistoricalWeek);
        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::LOAD_FAILED));
        assert!(rig.anim.route().is_none());
        assert_eq!(rig.anim.state(), AnimationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_alerts_and_stays_unloaded() {
        let mut rig = Rig::new(
            ScriptedHistory::default(),
            Arc::new(StraightLineRouter::default()),
            FakeLocation::default(),
        );
        rig.select(Mode::HistoricalYesterday);
        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::LOAD_FAILED));
        assert!(rig.obs.alerts[0].starts_with("Could not load historical route data"));
        assert!(rig.anim.route().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_outcome_from_previous_mode_is_dropped() {
        let mut rig = Rig::standard();
        rig.select(Mode::HistoricalWeek);
        // Let the fetch task finish and post its outcome.
        tokio::time::sleep(Duration::from_millis(1)).await;

        rig.select(Mode::InteractiveToday);
        let next = tokio::time::timeout(Duration::from_secs(5), rig.modes.next_event()).await;
        assert!(next.is_err(), "stale outcome was delivered");
        assert!(rig.anim.route().is_none());
    }
}

// ── Live ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod live {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn unavailable_source_reports_and_stays_idle() {
        let location = FakeLocation { unavailable: true, ..Default::default() };
        let mut rig = Rig::new(ScriptedHistory::default(), Arc::new(StraightLineRouter::default()), location);
        rig.select(Mode::Live);
        assert!(!rig.modes.is_watching());
        assert_eq!(rig.last_status(), Some(Status::LOCATION_UNAVAILABLE));
        assert_eq!(rig.obs.alerts.len(), 1);
        assert_eq!(rig.anim.state(), AnimationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_error_cancels_once() {
        let mut rig = Rig::standard();
        rig.select(Mode::Live);
        rig.location.push(Err(TrackerError::SourceUnavailable("timeout".into()))).await;
        rig.pump().await;

        assert_eq!(rig.location.cancel_count(), 1);
        assert!(!rig.modes.is_watching());
        assert_eq!(rig.last_status(), Some(Status::LOCATION_UNAVAILABLE));

        rig.select(Mode::HistoricalWeek);
        assert_eq!(rig.location.cancel_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn live_updates_move_marker_without_animating() {
        let mut rig = Rig::standard();
        rig.select(Mode::Live);
        for i in 0..3 {
            rig.location.push(Ok(Coordinate::new(18.0 + i as f64, 73.0))).await;
            rig.pump().await;
        }
        assert_eq!(rig.anim.position(), Coordinate::new(20.0, 73.0));
        assert_eq!(rig.anim.state(), AnimationState::Idle);
        assert_eq!(rig.anim.deadline(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_fix_moves_vehicle() {
        let fix = Coordinate::new(18.6, 73.7);
        let location = FakeLocation { fix: Some(fix), ..Default::default() };
        let mut rig = Rig::new(ScriptedHistory::default(), Arc::new(StraightLineRouter::default()), location);
        rig.modes.request_initial_fix();
        rig.pump().await;
        assert_eq!(rig.anim.position(), fix);
        assert_eq!(rig.obs.pans.last(), Some(&(fix, Some(15))));
    }

    #[tokio::test(start_paused = true)]
    async fn initial_fix_survives_mode_switch() {
        let fix = Coordinate::new(18.6, 73.7);
        let location = FakeLocation { fix: Some(fix), ..Default::default() };
        let mut rig = Rig::new(ScriptedHistory::default(), Arc::new(StraightLineRouter::default()), location);
        rig.modes.request_initial_fix();
        rig.select(Mode::InteractiveToday);
        rig.pump().await;
        assert_eq!(rig.anim.position(), fix);
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod interactive {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn map_click_routes_from_vehicle() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        let origin = rig.anim.position();
        let dest = Coordinate::new(18.53, 73.87);

        rig.modes.map_click(dest, &mut rig.anim, &mut rig.obs);
        rig.pump().await;

        let route = rig.anim.route().expect("route loaded");
        assert_eq!(route.points(), &[origin, dest]);
        assert_eq!(rig.anim.state(), AnimationState::Idle);
        assert_eq!(rig.last_status(), Some(Status::READY));
        assert_eq!(rig.obs.loaded, vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn map_click_ignored_in_other_modes() {
        let mut rig = Rig::standard();
        rig.select(Mode::HistoricalWeek);
        rig.pump().await;
        rig.modes.map_click(Coordinate::new(0.0, 0.0), &mut rig.anim, &mut rig.obs);
        assert!(!rig.modes.has_pending_request());
        assert_eq!(rig.anim.route().map(Route::len), Some(5));
    }

    #[tokio::test(start_paused = true)]
    async fn reroute_clears_route_immediately() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        rig.modes.map_click(Coordinate::new(18.53, 73.87), &mut rig.anim, &mut rig.obs);
        rig.pump().await;
        rig.anim.start(tokio::time::Instant::now(), &mut rig.obs).unwrap();

        rig.modes.map_click(Coordinate::new(18.54, 73.88), &mut rig.anim, &mut rig.obs);
        assert!(rig.anim.route().is_none());
        // Still running until the next tick notices the missing route.
        assert_eq!(rig.anim.state(), AnimationState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn search_geocodes_then_routes() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        rig.modes.search("  station ", &mut rig.obs);
        assert_eq!(rig.last_status(), Some(Status::SEARCHING));

        rig.pump().await; // geocoded
        let dest = Coordinate::new(18.5289, 73.8744);
        assert_eq!(rig.obs.pans.last(), Some(&(dest, Some(15))));

        rig.pump().await; // routed
        assert_eq!(rig.anim.route().and_then(Route::last), Some(dest));
        assert_eq!(rig.last_status(), Some(Status::ROUTE_FOUND));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_search_only_alerts() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        let statuses = rig.obs.statuses.len();
        rig.modes.search("   ", &mut rig.obs);
        assert_eq!(rig.obs.alerts, vec![EMPTY_QUERY_ALERT.to_owned()]);
        assert_eq!(rig.obs.statuses.len(), statuses);
        assert!(!rig.modes.has_pending_request());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_place_reports_not_found() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        rig.modes.search("atlantis", &mut rig.obs);
        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::NOT_FOUND));
        assert_eq!(rig.obs.alerts, vec!["Location not found.".to_owned()]);
        assert!(rig.anim.route().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn geocoder_failure_reports_search_error() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        rig.modes.search("offline", &mut rig.obs);
        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::SEARCH_ERROR));
        assert!(rig.obs.alerts[0].starts_with("Failed to search for location"));
    }

    #[tokio::test(start_paused = true)]
    async fn routing_failure_reports_and_leaves_no_route() {
        let mut rig = Rig::new(ScriptedHistory::default(), Arc::new(NoPathRouter), FakeLocation::default());
        rig.select(Mode::InteractiveToday);
        rig.modes.map_click(Coordinate::new(18.53, 73.87), &mut rig.anim, &mut rig.obs);
        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::ROUTING_ERROR));
        assert!(rig.obs.alerts[0].starts_with("Error finding route"));
        assert!(rig.anim.route().is_none());
        assert_eq!(rig.anim.state(), AnimationState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_result_of_replaced_click_is_dropped() {
        let first = Coordinate::new(18.53, 73.87);
        let router = Arc::new(OneWayRouter { reachable: first });
        let mut rig = Rig::new(ScriptedHistory::default(), router, FakeLocation::default());
        rig.select(Mode::InteractiveToday);

        rig.modes.map_click(first, &mut rig.anim, &mut rig.obs);
        // Let the first request finish and queue its route.
        tokio::time::sleep(Duration::from_millis(1)).await;
        rig.modes.map_click(Coordinate::new(18.60, 73.95), &mut rig.anim, &mut rig.obs);

        rig.pump().await;
        assert_eq!(rig.last_status(), Some(Status::ROUTING_ERROR));
        assert!(rig.anim.route().is_none());
        assert!(rig.obs.loaded.is_empty());

        let next = tokio::time::timeout(Duration::from_secs(5), rig.modes.next_event()).await;
        assert!(next.is_err(), "replaced route was delivered");
    }

    #[tokio::test(start_paused = true)]
    async fn finished_geocode_is_dropped_after_map_click() {
        let clicked = Coordinate::new(18.53, 73.87);
        let router = Arc::new(OneWayRouter { reachable: clicked });
        let mut rig = Rig::new(ScriptedHistory::default(), router, FakeLocation::default());
        rig.select(Mode::InteractiveToday);

        rig.modes.search("station", &mut rig.obs);
        tokio::time::sleep(Duration::from_millis(1)).await;
        rig.modes.map_click(clicked, &mut rig.anim, &mut rig.obs);

        rig.pump().await;
        assert_eq!(rig.anim.route().and_then(Route::last), Some(clicked));
        // The search never panned to its result.
        assert!(rig.obs.pans.iter().all(|&(_, zoom)| zoom.is_none()));
        assert_ne!(rig.last_status(), Some(Status::ROUTE_FOUND));
    }

    #[tokio::test(start_paused = true)]
    async fn too_few_waypoints_is_route_error() {
        let mut rig = Rig::standard();
        rig.select(Mode::InteractiveToday);
        rig.modes.request_route(vec![Coordinate::new(0.0, 0.0)], false, &mut rig.anim, &mut rig.obs);
        assert_eq!(rig.last_status(), Some(Status::ROUTE_ERROR));
        assert!(!rig.modes.has_pending_request());
    }
}

// ── Default collaborators ─────────────────────────────────────────────────────

#[cfg(test)]
mod defaults {
    use std::io::Write;

    use super::*;
    use crate::DatasetDirectory;

    #[test]
    fn straight_line_densifies_each_leg() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 0.01); // ~1.1 km
        let route = StraightLineRouter::new(100.0).densify(&[a, b]).unwrap();
        assert_eq!(route.first(), Some(a));
        assert_eq!(route.last(), Some(b));
        assert_eq!(route.len(), 13); // ceil(1112 / 100) = 12 steps + origin
        for w in route.points().windows(2) {
            assert!(w[0].distance_m(w[1]) <= 100.0 + 1e-6);
        }
    }

    #[test]
    fn straight_line_needs_two_waypoints() {
        let err = StraightLineRouter::default().densify(&[Coordinate::new(0.0, 0.0)]).unwrap_err();
        assert_eq!(err, TrackerError::InsufficientWaypoints(1));
    }

    #[test]
    fn straight_line_rejects_bad_spacing() {
        let pts = [Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
        assert!(matches!(StraightLineRouter::new(0.0).densify(&pts), Err(TrackerError::Config(_))));
    }

    #[tokio::test]
    async fn directory_reads_json_and_csv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("a.json"))
            .unwrap()
            .write_all(br#"[{"latitude": 1, "longitude": 2}, {"latitude": 3, "longitude": 4}]"#)
            .unwrap();
        std::fs::File::create(dir.path().join("b.csv"))
            .unwrap()
            .write_all(b"latitude,longitude\n5,6\n")
            .unwrap();

        let source = DatasetDirectory::new(dir.path());
        assert_eq!(source.fetch("a.json").await.unwrap().len(), 2);
        assert_eq!(source.fetch("b.csv").await.unwrap().first(), Some(Coordinate::new(5.0, 6.0)));
        assert!(matches!(source.fetch("missing.json").await, Err(TrackerError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn directory_refuses_escaping_identifiers() {
        let source = DatasetDirectory::new("/tmp");
        for bad in ["../etc/passwd.json", "/etc/passwd.json", ""] {
            assert!(matches!(source.fetch(bad).await, Err(TrackerError::FetchFailed(_))), "{bad}");
        }
    }
}
