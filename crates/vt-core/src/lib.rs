//! `vt-core` — foundational types for the `rust_vt` vehicle tracker.
//!
//! This crate is a dependency of every other `vt-*` crate.  It has no `vt-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`geo`]      | `Coordinate`, `Bearing`, `bearing()`, haversine distance  |
//! | [`mode`]     | `Mode` — the four mutually exclusive data sources         |
//! | [`status`]   | `Status`, `StatusKind` — user-visible status vocabulary   |
//! | [`config`]   | `TrackerConfig`, `DatasetConfig`                          |
//! | [`error`]    | `TrackerError`, `TrackerResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `TrackerConfig` from a file.              |

pub mod config;
pub mod error;
pub mod geo;
pub mod mode;
pub mod status;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{validate_period_ms, DatasetConfig, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use geo::{bearing, Bearing, Coordinate, GLYPH_OFFSET_DEG};
pub use mode::Mode;
pub use status::{Status, StatusKind};
