//! Axis-aligned bounding box; its diagonal scales the merge tolerance.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned bounding box over a set of points.
///
/// An empty box (no point absorbed yet) has `min = +inf` and `max = -inf`;
/// once a point has been absorbed, `min <= max` holds componentwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point,
    max: Point,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// An empty box.
    pub fn new() -> Self {
        Self {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut aabb = Self::new();
        for p in points {
            aabb.update(p);
        }
        aabb
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn min_point(&self) -> &Point { &self.min }
    pub fn max_point(&self) -> &Point { &self.max }

    /// Extend the box so that it contains `p`.  Returns `true` if it grew.
    pub fn update(&mut self, p: &Point) -> bool {
        let before = (self.min, self.max);
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
        before != (self.min, self.max)
    }

    pub fn contains(&self, p: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    /// Euclidean distance between the two corners; `0.0` for an empty box.
    pub fn diagonal_length(&self) -> f64 {
        if self.is_empty() { return 0.0; }
        self.min.sqr_dist(&self.max).sqrt()
    }
}
