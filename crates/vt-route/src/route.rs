//! The immutable `Route` value.

use std::sync::Arc;

use vt_core::Coordinate;

/// An ordered, immutable sequence of coordinates.
///
/// Backed by `Arc<[Coordinate]>` so a route can be handed from a source
/// task to the store and logged or inspected elsewhere without copying.
/// A new route replaces an old one; a route is never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    points: Arc<[Coordinate]>,
}

impl Route {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points: points.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` if the route has enough points to animate (at least two).
    #[inline]
    pub fn is_animatable(&self) -> bool {
        self.points.len() >= 2
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Coordinate> {
        self.points.get(index).copied()
    }

    #[inline]
    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Coordinate> {
        self.points.last().copied()
    }

    #[inline]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Sum of haversine leg lengths, in metres.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| w[0].distance_m(w[1]))
            .sum()
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Coordinate>> for Route {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
