//! `vt-session` — composition root for the rust_vt vehicle tracker.
//!
//! # Event loop
//!
//! ```text
//! SessionHandle ──Command──►┐
//!                           │   Session::run (one task)
//! tick deadline ───────────►├──► AnimationController ─┐
//!                           │                          ├─► Presenter ─► MapView
//! live updates / outcomes ─►└──► ModeController ──────┘        │
//!                                                              └─► broadcast<TrackerEvent>
//! ```
//!
//! All tracker state is owned by the loop.  Collaborator requests run on
//! spawned tasks and report back through channels, so nothing is shared
//! and nothing is locked.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`event`]     | `Command`, `TrackerEvent`                              |
//! | [`view`]      | `MapView` — the map widget seam, `HeadlessView`        |
//! | [`popup`]     | `PopupContent` — vehicle status popup                  |
//! | [`presenter`] | `Presenter` — observer → view + event stream           |
//! | [`handle`]    | `SessionHandle`                                        |
//! | [`builder`]   | `SessionBuilder`                                       |
//! | [`session`]   | `Session::run`                                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vt_session::{HeadlessView, SessionBuilder};
//!
//! let (mut session, handle) = SessionBuilder::new(services, HeadlessView)
//!     .config(config)
//!     .build()?;
//! let mut events = handle.subscribe();
//! tokio::spawn(async move {
//!     handle.select_mode(Mode::HistoricalWeek).await?;
//!     handle.start().await
//! });
//! session.run().await;
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod handle;
pub mod popup;
pub mod presenter;
pub mod session;
pub mod view;


pub use builder::{SessionBuilder, COMMAND_CAPACITY};
pub use error::{SessionError, SessionResult};
pub use event::{Command, TrackerEvent};
pub use handle::SessionHandle;
pub use popup::{approx_speed_kmh, PopupContent};
pub use presenter::{Presenter, EVENT_CAPACITY};
pub use session::Session;
pub use view::{HeadlessView, MapView};
