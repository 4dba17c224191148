//! Bulk deduplication of a raw point sequence.
//!
//! Points closer than `eps` in the max-norm are collapsed onto the one with
//! the smallest original index.  The survivors keep their original relative
//! order and are numbered contiguously; `id_map[k]` tells where input point
//! `k` ended up.
//!
//! # Steps
//!
//! 1. Sort a working copy lexicographically, recording the permutation.
//! 2. Link every pair within `eps` into one class.  Links are kept in a
//!    parent array whose roots are always the smallest original index of the
//!    class; each entry points at a smaller index or at itself.  Because
//!    links are keyed by original index, the result does not depend on how
//!    the unstable sort ordered equal points.
//! 3. Find maximal runs of sorted neighbours within `eps` and reorder each
//!    run by original index, carrying the points along.
//! 4. Put the points back into original order.
//! 5. Resolve parent chains to their roots, drop non-roots and renumber.
//!
//! Coordinates must be finite.

use std::cmp::Ordering;
use std::ops::Range;

use crate::point::Point;
use crate::sort;

/// Result of [`make_points_unique`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniquePoints {
    /// Surviving points, in original relative order.
    pub points: Vec<Point>,
    /// `id_map[k]` is the index into `points` of input point `k`.
    pub id_map: Vec<usize>,
}

impl UniquePoints {
    /// Number of input points that were merged away.
    pub fn num_merged(&self) -> usize {
        self.id_map.len() - self.points.len()
    }
}

/// Collapse all points within `eps` of each other (max-norm).
///
/// Takes ownership of `points`; duplicates are dropped.
pub fn make_points_unique(points: Vec<Point>, eps: f64) -> UniquePoints {
    debug_assert!(points.iter().all(Point::is_finite), "make_points_unique: non-finite coordinate");
    let n = points.len();
    if n == 0 {
        return UniquePoints::default();
    }

    let mut sorted = points;
    let mut perm = sort::identity(n);
    let mut parent = sort::identity(n);

    sort::sort_with_permutation(&mut sorted, &mut perm, |a, b| a.total_cmp(b) == Ordering::Less);

    link_close_points(&sorted, &perm, eps, &mut parent);

    let runs = identical_runs(&sorted, eps);
    stabilize(&runs, &mut sorted, &mut perm);

    sort::restore_original_order(&mut perm, &mut sorted);
    resolve_chains(&mut parent);

    let mut id_map = vec![0; n];
    let mut next_id = 0;
    for k in 0..n {
        if parent[k] == k {
            id_map[k] = next_id;
            next_id += 1;
        } else {
            // parent[k] < k, so its final id is already known.
            id_map[k] = id_map[parent[k]];
        }
    }

    let points = sorted
        .into_iter()
        .enumerate()
        .filter_map(|(k, p)| (parent[k] == k).then_some(p))
        .collect();

    UniquePoints { points, id_map }
}

/// Maximal ranges (length >= 2) of sorted neighbours within `eps`.
fn identical_runs(sorted: &[Point], eps: f64) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = None;
    for k in 0..sorted.len().saturating_sub(1) {
        if sorted[k + 1].max_norm_dist(&sorted[k]) <= eps {
            start.get_or_insert(k);
        } else if let Some(s) = start.take() {
            runs.push(s..k + 1);
        }
    }
    if let Some(s) = start {
        runs.push(s..sorted.len());
    }
    runs
}

/// Reorder each run by original index, carrying the points along.
/// Runs are expected to be short, so a plain exchange sort is used.
fn stabilize(runs: &[Range<usize>], sorted: &mut [Point], perm: &mut [usize]) {
    for run in runs {
        for _ in run.clone() {
            for k in run.start..run.end - 1 {
                if perm[k] > perm[k + 1] {
                    perm.swap(k, k + 1);
                    sorted.swap(k, k + 1);
                }
            }
        }
    }
}

/// End of the group starting at `start` whose key equals `key(sorted[start])`.
fn group_end(sorted: &[Point], start: usize, end: usize, key: fn(&Point) -> f64) -> usize {
    let k = key(&sorted[start]);
    start + sorted[start..end].partition_point(|p| key(p).total_cmp(&k) != Ordering::Greater)
}

/// Link every pair of points within `eps`; returns the number of distance
/// evaluations.
///
/// `sorted` is in lexicographic order, so every point `j > k` within `eps`
/// of `k` lies in an x-group no more than `eps` to the right.  Each x-group
/// is sorted by `(y, z)`: binary search narrows it to the y-groups within
/// `eps`, and each of those to the z-range within `eps`.  Only what is left
/// is compared.  This finds pairs that are close in max-norm but far apart
/// in sort order, without comparing whole planes of points that share an x.
fn link_close_points(sorted: &[Point], perm: &[usize], eps: f64, parent: &mut [usize]) -> usize {
    let n = sorted.len();
    let mut evaluations = 0;
    for k in 0..n {
        let p = sorted[k];
        let (y_lo, y_hi) = (p.y - eps, p.y + eps);
        let (z_lo, z_hi) = (p.z - eps, p.z + eps);

        let mut gx = k + 1;
        while gx < n && sorted[gx].x <= p.x + eps {
            let gx_end = group_end(sorted, gx, n, |q| q.x);

            let mut gy = gx + sorted[gx..gx_end].partition_point(|q| q.y < y_lo);
            while gy < gx_end && sorted[gy].y <= y_hi {
                let gy_end = group_end(sorted, gy, gx_end, |q| q.y);

                let mut j = gy + sorted[gy..gy_end].partition_point(|q| q.z < z_lo);
                while j < gy_end && sorted[j].z <= z_hi {
                    evaluations += 1;
                    if p.max_norm_dist(&sorted[j]) <= eps {
                        link(parent, perm[k], perm[j]);
                    }
                    j += 1;
                }
                gy = gy_end;
            }
            gx = gx_end;
        }
    }
    evaluations
}

/// Root of `k`, compressing the path on the way.
fn find(parent: &mut [usize], mut k: usize) -> usize {
    let mut root = k;
    while parent[root] != root {
        root = parent[root];
    }
    while parent[k] != root {
        let next = parent[k];
        parent[k] = root;
        k = next;
    }
    root
}

/// Merge the classes of `a` and `b`; the smaller root wins.
fn link(parent: &mut [usize], a: usize, b: usize) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    match ra.cmp(&rb) {
        Ordering::Less    => parent[rb] = ra,
        Ordering::Greater => parent[ra] = rb,
        Ordering::Equal   => {}
    }
}

/// Point every entry directly at its root, however long the chain.
pub(crate) fn resolve_chains(parent: &mut [usize]) {
    for k in 0..parent.len() {
        parent[k] = find(parent, k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point {
        Point::new(x, y, z)
    }

    #[test]
    fn empty_input() {
        let unique = make_points_unique(Vec::new(), 1e-6);
        assert!(unique.points.is_empty());
        assert!(unique.id_map.is_empty());
    }

    #[test]
    fn near_duplicate_collapses_onto_first() {
        let pts = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0001), p(5.0, 5.0, 5.0)];
        let unique = make_points_unique(pts, 0.0002);
        assert_eq!(unique.points, [p(0.0, 0.0, 0.0), p(5.0, 5.0, 5.0)]);
        assert_eq!(unique.id_map, [0, 0, 1]);
        assert_eq!(unique.num_merged(), 1);
    }

    #[test]
    fn representative_is_smallest_original_index() {
        // The kept point is the first occurrence, even though a later
        // duplicate sorts before it.
        let pts = vec![p(1.0, 1.0, 1.0), p(2.0, 0.0, 0.0), p(1.0, 1.0, 1.0 - 1e-9)];
        let unique = make_points_unique(pts, 1e-6);
        assert_eq!(unique.points, [p(1.0, 1.0, 1.0), p(2.0, 0.0, 0.0)]);
        assert_eq!(unique.id_map, [0, 1, 0]);
    }

    #[test]
    fn close_points_that_are_not_sorted_neighbours() {
        // (0,1,0) sorts between the two near-identical points.
        let pts = vec![p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1e-9, 0.0, 0.0)];
        let unique = make_points_unique(pts, 1e-6);
        assert_eq!(unique.points.len(), 2);
        assert_eq!(unique.id_map, [0, 1, 0]);
    }

    /// Distance evaluations made by the linking pass over `points`.
    fn link_evaluations(points: &[Point], eps: f64) -> (usize, Vec<usize>) {
        let n = points.len();
        let mut sorted = points.to_vec();
        let mut perm = sort::identity(n);
        let mut parent = sort::identity(n);
        sort::sort_with_permutation(&mut sorted, &mut perm, |a, b| a.total_cmp(b) == Ordering::Less);
        let evaluations = link_close_points(&sorted, &perm, eps, &mut parent);
        resolve_chains(&mut parent);
        (evaluations, parent)
    }

    fn plane(side: u32) -> Vec<Point> {
        (0..side * side).map(|i| p(0.0, f64::from(i / side), f64::from(i % side))).collect()
    }

    #[test]
    fn shared_x_plane_is_not_compared_pairwise() {
        // All points share x, so the x bound alone would compare every pair.
        let points = plane(100);
        let (evaluations, parent) = link_evaluations(&points, 0.1);
        assert_eq!(evaluations, 0);
        assert_eq!(parent, sort::identity(points.len()));
    }

    #[test]
    fn shared_x_plane_with_copies_compares_only_neighbours() {
        let mut points = plane(100);
        let n = points.len();
        let copies: Vec<_> = (0..n).map(|k| p(0.0, points[k].y, points[k].z + 0.01)).collect();
        points.extend(copies);

        let (evaluations, parent) = link_evaluations(&points, 0.1);
        assert_eq!(evaluations, n);
        for k in 0..n {
            assert_eq!(parent[k], k);
            assert_eq!(parent[n + k], k);
        }

        let unique = make_points_unique(points, 0.1);
        assert_eq!(unique.points.len(), n);
        assert_eq!(unique.num_merged(), n);
    }

    #[test]
    fn runs_are_split_at_gaps() {
        let runs = identical_runs(
            &[p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 0.0, 0.0)],
            0.1,
        );
        assert_eq!(runs, [0..2, 3..5]);
    }

    #[test]
    fn stabilize_orders_runs_by_original_index() {
        let mut sorted = vec![p(0.0, 0.0, 0.0), p(0.0, 0.0, 0.1), p(0.0, 0.0, 0.2), p(9.0, 0.0, 0.0)];
        let mut perm = vec![2, 0, 3, 1];
        stabilize(&[0..3], &mut sorted, &mut perm);
        assert_eq!(perm, [0, 2, 3, 1]);
        // Points travel with their index.
        assert_eq!(sorted[0], p(0.0, 0.0, 0.1));
        assert_eq!(sorted[1], p(0.0, 0.0, 0.0));
        assert_eq!(sorted[3], p(9.0, 0.0, 0.0));
    }

    #[test]
    fn deep_chain_resolves_to_root() {
        let n: usize = 10_000;
        // parent[k] = k - 1: one long chain.
        let mut parent: Vec<usize> = (0..n).map(|k| k.saturating_sub(1)).collect();
        resolve_chains(&mut parent);
        assert!(parent.iter().all(|&r| r == 0));
    }

    #[test]
    fn link_keeps_smallest_root() {
        let mut parent = sort::identity(6);
        link(&mut parent, 5, 4);
        link(&mut parent, 3, 4);
        link(&mut parent, 1, 5);
        resolve_chains(&mut parent);
        assert_eq!(parent, [0, 1, 2, 1, 1, 1]);
    }
}
