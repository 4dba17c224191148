//! `PointVec`: a named set of pairwise-separated points.
//!
//! # Invariants
//!
//! * Any two stored points are more than `tolerance` apart (max-norm).
//! * `id_map[k]` is a valid point id for every input index `k`, and every
//!   point id is the target of at least one input index.
//! * `name_to_id` and `id_to_name` agree: `id_to_name[id] == name` for every
//!   `(name, id)` pair, and a point carries at most one name.
//!
//! `tolerance` is fixed at construction (relative epsilon times the diagonal
//! of the input bounding box); later insertions compare against it but never
//! re-run the bulk deduplication.

use std::collections::BTreeMap;

use ahash::AHashMap;
use log::{debug, warn};

use crate::aabb::BoundingBox;
use crate::config::{PointType, PointVecConfig};
use crate::dedup::make_points_unique;
use crate::error::{PointVecError, Result};
use crate::point::Point;

#[derive(Clone, Debug)]
pub struct PointVec {
    name:       String,
    point_type: PointType,

    /// Canonical points, addressed by id.
    points: Vec<Point>,

    /// Input index (construction input, then one entry per `push_back`)
    /// to point id.
    id_map: Vec<usize>,

    name_to_id: AHashMap<String, usize>,
    /// Parallel to `points`; empty for unnamed points.
    id_to_name: Vec<String>,

    aabb:       BoundingBox,
    rel_eps:    f64,
    tolerance:  f64,
    num_merged: usize,
}

impl PointVec {
    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Build a point set from raw input, merging points that coincide within
    /// `config.rel_eps` times the diagonal of their bounding box.
    ///
    /// `names` maps a name to an index into `points`.  If several names end
    /// up on the same merged point, the first in name order is kept and the
    /// others are dropped with a warning.
    ///
    /// Fails if any coordinate is `NaN` or infinite, or if the resulting
    /// tolerance is not finite.
    pub fn new(
        config: PointVecConfig,
        points: Vec<Point>,
        names:  Option<BTreeMap<String, usize>>,
    ) -> Result<Self> {
        config.validate()?;

        let names = names.unwrap_or_default();
        let n = points.len();
        if let Some((name, &index)) = names.iter().find(|(_, index)| **index >= n) {
            return Err(PointVecError::InvalidNameIndex { name: name.clone(), index, len: n });
        }

        if let Some((index, &point)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(PointVecError::NonFinitePoint { index, point });
        }

        let aabb = BoundingBox::from_points(&points);
        let tolerance = config.rel_eps * aabb.diagonal_length();
        if !tolerance.is_finite() {
            return Err(PointVecError::NonFiniteTolerance(tolerance));
        }

        let unique = make_points_unique(points, tolerance);
        let num_merged = unique.num_merged();
        if num_merged > 0 {
            warn!("PointVec '{}': there are {} double points.", config.name, num_merged);
        }
        debug!(
            "PointVec '{}': {} input points -> {} unique (tolerance {:e})",
            config.name, n, unique.points.len(), tolerance,
        );

        let mut vec = Self {
            name:       config.name,
            point_type: config.point_type,
            id_to_name: vec![String::new(); unique.points.len()],
            points:     unique.points,
            id_map:     unique.id_map,
            name_to_id: AHashMap::with_capacity(names.len()),
            aabb,
            rel_eps:    config.rel_eps,
            tolerance,
            num_merged,
        };
        vec.attach_names(names);
        Ok(vec)
    }

    /// Build an unnamed point set with default settings.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        Self::new(PointVecConfig::default(), points, None)
    }

    /// Rewrite `name -> input index` into `name -> point id`.
    fn attach_names(&mut self, names: BTreeMap<String, usize>) {
        for (name, index) in names {
            let id = self.id_map[index];
            if self.id_to_name[id].is_empty() {
                self.id_to_name[id] = name.clone();
                self.name_to_id.insert(name, id);
            } else {
                warn!(
                    "PointVec '{}': point {} is already named '{}', dropping name '{}'.",
                    self.name, id, self.id_to_name[id], name,
                );
            }
        }
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Insert a point, or find the stored point it coincides with.
    /// Returns the point's id.  A point with a non-finite coordinate is
    /// rejected and leaves the set unchanged.
    pub fn push_back(&mut self, point: Point) -> Result<usize> {
        if !point.is_finite() {
            return Err(PointVecError::NonFinitePoint { index: self.id_map.len(), point });
        }
        let id = self.unique_insert(point);
        self.id_map.push(id);
        Ok(id)
    }

    /// Like [`push_back`](Self::push_back), also naming the point.
    ///
    /// The name is dropped with a warning if it already belongs to another
    /// point, or if the point merged into one that already has a different
    /// name.  The insertion itself still happens.
    pub fn push_back_named(&mut self, point: Point, name: &str) -> Result<usize> {
        let id = self.push_back(point)?;
        if name.is_empty() {
            return Ok(id);
        }

        match self.name_to_id.get(name) {
            Some(&owner) if owner == id => {}
            Some(&owner) => warn!(
                "PointVec '{}': two points share the name '{}' (ids {} and {}).",
                self.name, name, owner, id,
            ),
            None if !self.id_to_name[id].is_empty() => warn!(
                "PointVec '{}': point {} is already named '{}', dropping name '{}'.",
                self.name, id, self.id_to_name[id], name,
            ),
            None => {
                self.name_to_id.insert(name.to_owned(), id);
                self.id_to_name[id] = name.to_owned();
            }
        }
        Ok(id)
    }

    /// Linear scan for a stored point within tolerance; first match wins.
    fn unique_insert(&mut self, point: Point) -> usize {
        if let Some(id) = self.points.iter().position(|p| p.max_norm_dist(&point) <= self.tolerance) {
            return id;
        }
        self.aabb.update(&point);
        self.points.push(point);
        self.id_to_name.push(String::new());
        self.points.len() - 1
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn len(&self)      -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool  { self.points.is_empty() }

    pub fn name(&self) -> &str { &self.name }
    pub fn set_name(&mut self, name: impl Into<String>) { self.name = name.into(); }
    pub fn point_type(&self) -> PointType { self.point_type }

    pub fn rel_eps(&self)   -> f64 { self.rel_eps }
    /// Absolute merge tolerance, fixed at construction.
    pub fn tolerance(&self) -> f64 { self.tolerance }
    /// Number of input points merged away during construction.
    pub fn num_merged(&self) -> usize { self.num_merged }
    /// Bounding box of the stored points (grows with `push_back`).
    pub fn bounding_box(&self) -> &BoundingBox { &self.aabb }

    pub fn points(&self) -> &[Point] { &self.points }

    pub fn point(&self, id: usize) -> Result<&Point> {
        self.points.get(id).ok_or(PointVecError::OutOfRange { id, len: self.points.len() })
    }

    pub fn id_by_name(&self, name: &str) -> Result<usize> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| PointVecError::NotFound(name.to_owned()))
    }

    pub fn point_by_name(&self, name: &str) -> Result<&Point> {
        self.id_by_name(name).and_then(|id| self.point(id))
    }

    /// Name of point `id`; empty if the point is unnamed.
    pub fn name_by_id(&self, id: usize) -> Result<&str> {
        self.id_to_name
            .get(id)
            .map(String::as_str)
            .ok_or(PointVecError::OutOfRange { id, len: self.points.len() })
    }

    /// Name of point `id`, or `None` if it is unnamed or does not exist.
    pub fn name_of_point(&self, id: usize) -> Option<&str> {
        self.id_to_name.get(id).map(String::as_str).filter(|name| !name.is_empty())
    }

    /// Point id of input index `index`.
    pub fn canonical_id(&self, index: usize) -> Result<usize> {
        self.id_map
            .get(index)
            .copied()
            .ok_or(PointVecError::OutOfRange { id: index, len: self.id_map.len() })
    }

    /// Input index to point id, for every input point seen so far.
    pub fn id_map(&self) -> &[usize] { &self.id_map }

    /// All `(name, id)` pairs, sorted by name.
    pub fn names(&self) -> Vec<(&str, usize)> {
        let mut names: Vec<_> = self.name_to_id.iter().map(|(name, &id)| (name.as_str(), id)).collect();
        names.sort_unstable();
        names
    }
}
