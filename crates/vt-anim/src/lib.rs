//! `vt-anim` — the route animation controller.
//!
//! # State machine
//!
//! ```text
//!             start() [route ≥ 2 points]
//!   Idle ─────────────────────────────► Running ──tick: exhausted──► Finished
//!   Paused ◄──────────stop()─────────── Running
//!   Paused / Finished ──start()──► Running
//!   any ──reset()──► Idle   (cursor 0, marker at route start, "Ready")
//! ```
//!
//! Each tick while `Running`:
//!
//! ```text
//!   ① route gone?      → cancel timer, Idle, status "Ready"
//!   ② cursor at end?   → cancel timer, Finished, status "Finished"
//!   ③ otherwise        → heading = bearing(current, next) if next exists,
//!                        emit position + heading, advance cursor
//! ```
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`timer`]      | `PeriodicTimer` — cancellable fixed-period schedule     |
//! | [`state`]      | `AnimationState`                                        |
//! | [`observer`]   | `TrackerObserver` — presentation callbacks              |
//! | [`controller`] | `AnimationController`                                   |
//!
//! The controller never sleeps.  It owns the schedule and exposes the next
//! deadline; the session event loop awaits that deadline and calls
//! [`AnimationController::on_tick`].  Time is passed in explicitly, which
//! keeps every transition testable without a runtime.

pub mod controller;
pub mod observer;
pub mod state;
pub mod timer;


pub use controller::AnimationController;
pub use observer::TrackerObserver;
pub use state::AnimationState;
pub use timer::{until_deadline, PeriodicTimer};
