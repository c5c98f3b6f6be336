//! Results flowing back from sources into the mode controller.

use vt_core::{Coordinate, TrackerResult};
use vt_route::Route;

/// Result of one asynchronous request started by the controller.
#[derive(Debug)]
pub enum SourceOutcome {
    /// A historical dataset fetch finished.
    Dataset {
        dataset: String,
        result:  TrackerResult<Route>,
    },
    /// A place-name lookup finished.
    Geocoded {
        query:  String,
        result: TrackerResult<Coordinate>,
    },
    /// A route computation finished.  `from_search` selects the status
    /// reported on success.
    Routed {
        result:      TrackerResult<Route>,
        from_search: bool,
    },
    /// The one-shot startup position fix finished.
    InitialFix(TrackerResult<Coordinate>),
}

/// Anything the active source delivered.
#[derive(Debug)]
pub enum SourceEvent {
    /// A live-position update (or failure) from the watch subscription.
    Live(TrackerResult<Coordinate>),
    /// A request started under the current generation completed.
    Outcome(SourceOutcome),
}

/// How an outcome is matched against the controller's current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stamp {
    /// Outlives mode switches and newer requests (startup fix).
    Detached,
    /// Valid only while `generation` and `request` are still current.
    Request { generation: u64, request: u64 },
}

#[derive(Debug)]
pub(crate) struct Tagged {
    pub stamp:   Stamp,
    pub outcome: SourceOutcome,
}
