//! replay — drive a vehicle-tracker session from the terminal.
//!
//! Wires the tracker to file-backed history (`data/`), a straight-line
//! router, a fixed gazetteer and a simulated GPS receiver, then plays one
//! trip in the chosen mode and logs what a map would show.
//!
//! ```text
//! cargo run -p replay -- --mode week --speed 50 --popup
//! cargo run -p replay -- --mode today --search "aga khan palace"
//! RUST_LOG=debug cargo run -p replay -- --mode live --live-secs 3
//! ```

mod sources;
mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use vt_core::{Mode, Status, TrackerConfig};
use vt_mode::{Collaborators, DatasetDirectory, StraightLineRouter};
use vt_session::{SessionBuilder, SessionHandle, TrackerEvent};

use sources::{SimulatedGps, TableGeocoder};
use view::LogView;

// ── Constants ─────────────────────────────────────────────────────────────────

const ROUTE_SPACING_M: f64 = 40.0;
const GPS_INTERVAL_MS: u64 = 500;

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Clone)]
#[command(name = "replay")]
#[command(about = "Replay a vehicle trip through the tracker core", long_about = None)]
struct Args {
    /// Tracking mode: live, yesterday, week or today (default: from config)
    #[arg(long)]
    mode: Option<Mode>,

    /// Directory holding the historical datasets
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data"))]
    data_dir: PathBuf,

    /// JSON file with tracker configuration overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation tick period in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Place to search for in `today` mode
    #[arg(long, default_value = "pune station")]
    search: String,

    /// Seconds to follow the simulated GPS in `live` mode
    #[arg(long, default_value_t = 5)]
    live_secs: u64,

    /// Open the vehicle popup before starting
    #[arg(long)]
    popup: bool,
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None       => TrackerConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.initial_mode = mode;
    }
    if let Some(ms) = args.speed {
        config.tick_period_ms = ms;
    }
    let mode = config.initial_mode;

    let services = Collaborators {
        routing:  Arc::new(StraightLineRouter::new(ROUTE_SPACING_M)),
        geocoder: Arc::new(TableGeocoder),
        history:  Arc::new(DatasetDirectory::new(&args.data_dir)),
        location: Arc::new(SimulatedGps::new(
            config.default_center,
            Duration::from_millis(GPS_INTERVAL_MS),
        )),
    };

    let (mut session, handle) = SessionBuilder::new(services, LogView::default())
        .config(config)
        .build()
        .context("invalid tracker configuration")?;

    let events = handle.subscribe();
    let script = tokio::spawn(drive(handle, events, mode, args));
    session.run().await;
    script.await.context("driver task panicked")??;

    info!(marker_moves = session.presenter().view().moves, "done");
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

fn load_config(path: &Path) -> Result<TrackerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

// ── Script ────────────────────────────────────────────────────────────────────

/// Play one trip in `mode`, then shut the session down.
async fn drive(
    handle: SessionHandle,
    mut events: broadcast::Receiver<TrackerEvent>,
    mode: Mode,
    args: Args,
) -> Result<()> {
    let outcome = match mode {
        Mode::Live => {
            tokio::time::sleep(Duration::from_secs(args.live_secs)).await;
            Ok(())
        }
        Mode::HistoricalYesterday | Mode::HistoricalWeek => {
            play(&handle, &mut events, args.popup).await
        }
        Mode::InteractiveToday => {
            handle.search(args.search.as_str()).await?;
            play(&handle, &mut events, args.popup).await
        }
    };
    handle.shutdown().await?;
    outcome
}

/// Wait until a route is ready to animate, or fail with the status that
/// says why not.
async fn await_route(events: &mut broadcast::Receiver<TrackerEvent>) -> Result<()> {
    loop {
        match next(events).await? {
            TrackerEvent::Status(s) if s == Status::ROUTE_LOADED || s == Status::ROUTE_FOUND => {
                return Ok(());
            }
            TrackerEvent::Status(s)
                if [
                    Status::LOAD_FAILED,
                    Status::NOT_FOUND,
                    Status::SEARCH_ERROR,
                    Status::ROUTING_ERROR,
                    Status::NO_ROUTE,
                    Status::ROUTE_ERROR,
                ]
                .contains(&s) =>
            {
                bail!("no route: {}", s.text);
            }
            _ => {}
        }
    }
}

/// Once a route is ready, animate it to the end.
async fn play(
    handle: &SessionHandle,
    events: &mut broadcast::Receiver<TrackerEvent>,
    popup:  bool,
) -> Result<()> {
    await_route(events).await?;
    if popup {
        handle.marker_clicked().await?;
    }
    handle.start().await?;

    let mut positions = 0usize;
    loop {
        match next(events).await? {
            TrackerEvent::Position { .. } => positions += 1,
            TrackerEvent::Status(s) if s == Status::FINISHED => break,
            _ => {}
        }
    }
    info!(positions, "trip finished");
    Ok(())
}

async fn next(events: &mut broadcast::Receiver<TrackerEvent>) -> Result<TrackerEvent> {
    loop {
        match events.recv().await {
            Ok(event) => return Ok(event),
            Err(RecvError::Lagged(n)) => warn!(skipped = n, "event stream lagged"),
            Err(RecvError::Closed) => bail!("session closed"),
        }
    }
}
