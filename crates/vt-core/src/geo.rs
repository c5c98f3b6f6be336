//! Geographic coordinate type and bearing math.
//!
//! `Coordinate` keeps full `f64` precision end to end.

/// Rotation added to every bearing so the vehicle glyph (drawn pointing
/// west-to-east at 0°) faces its direction of travel.
pub const GLYPH_OFFSET_DEG: f64 = 90.0;

/// A WGS-84 geographic coordinate.  Immutable value type.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude:  f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: Coordinate) -> f64 {
        const R: f64 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// Glyph bearing from `self` towards `other` (see [`bearing`]).
    #[inline]
    pub fn bearing_to(self, other: Coordinate) -> Bearing {
        bearing(self, other)
    }

    /// Linear interpolation in latitude/longitude space, `t ∈ [0, 1]`.
    ///
    /// Good enough for densifying short road legs; not a geodesic.
    #[inline]
    pub fn lerp(self, other: Coordinate, t: f64) -> Coordinate {
        Coordinate {
            latitude:  self.latitude + (other.latitude - self.latitude) * t,
            longitude: self.longitude + (other.longitude - self.longitude) * t,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

// ── Bearing ───────────────────────────────────────────────────────────────────

/// A heading for the vehicle glyph.
///
/// Holds the compass bearing plus [`GLYPH_OFFSET_DEG`], so the raw
/// [`rotation`](Self::rotation) lies in `[90, 450)`.  Renderers that want a
/// plain angle use [`normalized`](Self::normalized), which folds it back into
/// `[0, 360)`.  Both forms describe the same circular rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bearing(f64);

impl Bearing {
    /// Raw glyph rotation in `[90, 450)`.
    #[inline]
    pub fn rotation(self) -> f64 {
        self.0
    }

    /// Glyph rotation folded into `[0, 360)`.
    #[inline]
    pub fn normalized(self) -> f64 {
        self.0.rem_euclid(360.0)
    }

    /// Forward azimuth without the glyph offset, in `[0, 360)`.
    #[inline]
    pub fn compass(self) -> f64 {
        self.0 - GLYPH_OFFSET_DEG
    }
}

/// Initial great-circle bearing from `a` to `b`, rotated for the glyph.
///
/// Standard forward-azimuth formula.  The compass value is normalised into
/// `[0, 360)` before the offset is added.  When `a == b` the azimuth is
/// undefined; `atan2(0, 0)` yields 0 so the result is exactly the offset
/// (90°) rather than an error.
pub fn bearing(a: Coordinate, b: Coordinate) -> Bearing {
    let lat1  = a.latitude.to_radians();
    let lat2  = b.latitude.to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let mut compass = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid can round a tiny negative up to exactly 360.0.
    if compass >= 360.0 {
        compass = 0.0;
    }
    Bearing(compass + GLYPH_OFFSET_DEG)
}
