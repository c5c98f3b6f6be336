//! `vt-mode` — which source feeds the vehicle, and the seams to those sources.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`services`]   | Collaborator traits: routing, geocoding, history, location   |
//! | [`defaults`]   | `StraightLineRouter`, `DatasetDirectory`                     |
//! | [`outcome`]    | `SourceEvent`, `SourceOutcome` — results coming back in      |
//! | [`controller`] | `ModeController` — exclusive source switching                |
//!
//! # Switching protocol
//!
//! ```text
//! select_mode(new):
//!   ① tear down   — cancel the live subscription (exactly once), abort the
//!                   in-flight fetch/route task, bump the generation
//!   ② reset       — AnimationController::reset(), clear the route
//!   ③ activate    — Live: watch() · Historical: spawn fetch ·
//!                   InteractiveToday: wait for a click or a search
//! ```
//!
//! Asynchronous work runs on spawned tasks and reports back through a
//! channel owned by the controller.  Every report carries the generation it
//! was started under; reports from an earlier generation are dropped, so an
//! outgoing source can never write into the incoming one's state.

pub mod controller;
pub mod defaults;
pub mod outcome;
pub mod services;

#[cfg(test)]
mod tests;

pub use controller::{ModeController, EMPTY_QUERY_ALERT};
pub use defaults::{DatasetDirectory, StraightLineRouter};
pub use outcome::{SourceEvent, SourceOutcome};
pub use services::{
    Collaborators, Geocoder, HistoricalSource, LiveWatch, LocationProvider, RoutingService,
    SubscriptionId,
};
