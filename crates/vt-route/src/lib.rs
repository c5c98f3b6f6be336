//! `vt-route` — routes, the route cursor, and historical datasets.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`route`]   | `Route` — immutable, cheaply cloneable coordinate sequence   |
//! | [`store`]   | `RouteStore` — the active route plus a cursor into it        |
//! | [`dataset`] | JSON / CSV parsers for recorded `{latitude, longitude}` data |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                               |
//!
//! # Cursor model
//!
//! A loaded route of length `N` has a cursor in `0..=N`.  `cursor == N` means
//! the route is exhausted.  Exactly `N` calls to [`RouteStore::advance`]
//! exhaust a fresh route; further calls are no-ops that return `false`.

pub mod dataset;
pub mod error;
pub mod route;
pub mod store;


pub use dataset::{parse_csv_reader, parse_json_reader, parse_json_str, DatasetFormat};
pub use error::{RouteError, RouteResult};
pub use route::Route;
pub use store::RouteStore;
