//! The `RouteStore` — the active route and the animation cursor.

use vt_core::Coordinate;

use crate::Route;

/// Holds at most one route plus a cursor into it.
///
/// With no route loaded the store behaves like an empty route: nothing is
/// current and the cursor is already exhausted.
#[derive(Debug, Default)]
pub struct RouteStore {
    route:  Option<Route>,
    cursor: usize,
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior route with `route` and rewind the cursor.
    pub fn load(&mut self, route: Route) {
        self.route  = Some(route);
        self.cursor = 0;
    }

    /// Drop the loaded route, if any.
    pub fn clear(&mut self) {
        self.route  = None;
        self.cursor = 0;
    }

    #[inline]
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.route.is_some()
    }

    /// Number of points in the loaded route (0 if none).
    #[inline]
    pub fn len(&self) -> usize {
        self.route.as_ref().map_or(0, Route::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The point under the cursor, or `None` when exhausted or unloaded.
    pub fn current(&self) -> Option<Coordinate> {
        self.route.as_ref()?.get(self.cursor)
    }

    /// The point after the cursor, or `None` at the last point.
    pub fn peek_next(&self) -> Option<Coordinate> {
        self.route.as_ref()?.get(self.cursor + 1)
    }

    /// Move the cursor forward by one.
    ///
    /// Returns `false` (and leaves the cursor untouched) if the route is
    /// already exhausted; the cursor never passes `len()`.
    pub fn advance(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Rewind the cursor to the first point.  The route is kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.len()
    }
}
