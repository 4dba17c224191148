//! Points in 3-space and the two relations the dedup pass needs on them:
//! a sort order and a max-norm distance.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in 3-space.
///
/// [`Point::total_cmp`] orders points lexicographically by `(x, y, z)` using
/// `f64::total_cmp`, so `-0.0` sorts before `0.0`.  That order is only used
/// for sorting; closeness is decided by [`Point::max_norm_dist`].
///
/// Point sets expect finite coordinates: [`PointVec`](crate::PointVec)
/// rejects any point for which [`Point::is_finite`] is false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Chebyshev distance: the largest absolute difference of any coordinate.
    ///
    /// `NaN` if any difference is `NaN`, so a `NaN` point is never within
    /// tolerance of anything.
    pub fn max_norm_dist(&self, other: &Point) -> f64 {
        let d = [
            (self.x - other.x).abs(),
            (self.y - other.y).abs(),
            (self.z - other.z).abs(),
        ];
        if d.iter().any(|v| v.is_nan()) {
            return f64::NAN;
        }
        d[0].max(d[1]).max(d[2])
    }

    /// Squared Euclidean distance.
    pub fn sqr_dist(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn total_cmp(&self, other: &Point) -> Ordering {
        self.x.total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.total_cmp(&other.z))
    }
}

impl From<[f64; 3]> for Point {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
