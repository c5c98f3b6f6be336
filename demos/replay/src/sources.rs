//! Stand-in collaborators: a fixed gazetteer and a simulated GPS receiver.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use vt_core::{Coordinate, TrackerError, TrackerResult};
use vt_mode::{Geocoder, LiveWatch, LocationProvider, SubscriptionId};

// ── Gazetteer ─────────────────────────────────────────────────────────────────

const PLACES: &[(&str, f64, f64)] = &[
    ("shaniwar wada",   18.5195, 73.8553),
    ("pune station",    18.5289, 73.8744),
    ("koregaon park",   18.5362, 73.8940),
    ("aga khan palace", 18.5523, 73.9015),
    ("sinhagad road",   18.4837, 73.8206),
];

/// Geocoder over a small built-in table.  Matching ignores case and
/// surrounding whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableGeocoder;

#[async_trait]
impl Geocoder for TableGeocoder {
    async fn geocode(&self, query: &str) -> TrackerResult<Coordinate> {
        let key = query.trim().to_lowercase();
        PLACES
            .iter()
            .find(|(name, _, _)| *name == key)
            .map(|&(_, lat, lon)| Coordinate::new(lat, lon))
            .ok_or_else(|| TrackerError::NotFound(query.to_owned()))
    }
}

// ── Simulated GPS ─────────────────────────────────────────────────────────────

/// Location provider that drives a vehicle in a slow circle around
/// `center`, one fix per `interval`.
pub struct SimulatedGps {
    center:     Coordinate,
    radius_deg: f64,
    interval:   Duration,
    next_id:    AtomicU64,
    watches:    Mutex<HashMap<SubscriptionId, JoinHandle<()>>>,
}

impl SimulatedGps {
    pub fn new(center: Coordinate, interval: Duration) -> Self {
        Self {
            center,
            radius_deg: 0.003,
            interval,
            next_id: AtomicU64::new(1),
            watches: Mutex::new(HashMap::new()),
        }
    }

    fn fix_at(&self, step: u64) -> Coordinate {
        circle_point(self.center, self.radius_deg, step)
    }
}

fn circle_point(center: Coordinate, radius_deg: f64, step: u64) -> Coordinate {
    let angle = step as f64 * 0.15;
    Coordinate::new(
        center.latitude + radius_deg * angle.sin(),
        center.longitude + radius_deg * angle.cos(),
    )
}

#[async_trait]
impl LocationProvider for SimulatedGps {
    fn watch(&self) -> TrackerResult<LiveWatch> {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let (tx, updates) = mpsc::channel(8);
        let (center, radius, interval) = (self.center, self.radius_deg, self.interval);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            for step in 0u64.. {
                ticker.tick().await;
                if tx.send(Ok(circle_point(center, radius, step))).await.is_err() {
                    break;
                }
            }
        });
        self.watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, task);
        debug!(%id, "simulated gps watch started");
        Ok(LiveWatch { id, updates })
    }

    fn cancel(&self, id: SubscriptionId) {
        let task = self.watches.lock().unwrap_or_else(PoisonError::into_inner).remove(&id);
        if let Some(task) = task {
            task.abort();
            debug!(%id, "simulated gps watch cancelled");
        }
    }

    async fn current_position(&self) -> TrackerResult<Coordinate> {
        Ok(self.fix_at(0))
    }
}
