//! Concave hull extraction.
//!
//! Turns a raw point cloud plus its convex hull into a non-convex boundary
//! polygon that follows the cloud's actual shape. The convex hull edges are
//! processed longest-first: a long edge is "dug" inward by replacing it with
//! two edges through a well-placed interior point, while short edges are kept
//! as-is. Digging repeats on the replacement edges until every edge is either
//! short enough or has no acceptable interior point, so the boundary sinks
//! into concavities without ever crossing itself.
//!
//! An interior point is acceptable for an edge when it is closer (by distance
//! to the edge midpoint) to that edge than to any other edge still being
//! processed, when the wider of the two angles it forms with the edge's
//! endpoints stays below a configured threshold, and when the two replacement
//! edges do not cross any already-final edge.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use nalgebra::Point2;

use crate::error::{GeomError, Result};
use crate::geom::{self, Rect};

/// An edge of a hull, referencing two indices into a shared point buffer.
///
/// Edges are plain value pairs: two edges are equal when they connect the
/// same two point indices, regardless of direction.
#[derive(Debug, Clone, Copy)]
pub struct HullEdge {
    /// Index of the first endpoint.
    pub a: usize,
    /// Index of the second endpoint.
    pub b: usize,
}

impl HullEdge {
    /// Create an edge between two point indices.
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// The endpoint indices as an ordered pair, for set membership.
    #[inline]
    pub fn key(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Length of the edge over the given point buffer.
    pub fn length(&self, points: &[Point2<f64>]) -> f64 {
        (points[self.b] - points[self.a]).norm()
    }

    /// Midpoint of the edge over the given point buffer.
    pub fn midpoint(&self, points: &[Point2<f64>]) -> Point2<f64> {
        nalgebra::center(&points[self.a], &points[self.b])
    }
}

impl PartialEq for HullEdge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HullEdge {}

impl std::hash::Hash for HullEdge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Options for concave hull extraction.
#[derive(Debug, Clone)]
pub struct ConcaveHullOptions {
    /// Edges at or below this length are kept without digging.
    pub concavity_distance: f64,

    /// Maximum acceptable candidate angle, in degrees. A dig happens only if
    /// the wider of the two angles the candidate forms with the edge's
    /// endpoints is below this value.
    pub max_interior_angle_degrees: f64,
}

impl Default for ConcaveHullOptions {
    fn default() -> Self {
        Self {
            concavity_distance: 15.0,
            max_interior_angle_degrees: 100.0,
        }
    }
}

impl ConcaveHullOptions {
    /// Create options with the specified concavity distance.
    pub fn new(concavity_distance: f64) -> Self {
        Self {
            concavity_distance,
            ..Default::default()
        }
    }

    /// Set the maximum acceptable candidate angle in degrees.
    pub fn with_max_interior_angle(mut self, degrees: f64) -> Self {
        self.max_interior_angle_degrees = degrees;
        self
    }
}

/// A concave hull: the final boundary edge set and its vertex indices.
#[derive(Debug, Clone)]
pub struct ConcaveHull {
    /// Finalized boundary edges, each present exactly once, in the order
    /// they were finalized.
    pub edges: Vec<HullEdge>,

    /// Boundary vertex indices in first-seen order over `edges`, without
    /// duplicates.
    pub boundary: Vec<usize>,
}

impl ConcaveHull {
    /// Axis-aligned bounding rectangle of the boundary vertices.
    ///
    /// Returns `None` if the hull has no boundary vertices.
    pub fn bounding_rect(&self, points: &[Point2<f64>]) -> Option<Rect> {
        Rect::bounding(self.boundary.iter().map(|&i| points[i]))
    }
}

/// Entry in the work queue, ordered by descending edge length.
#[derive(Debug, Clone, Copy)]
struct QueuedEdge {
    edge: HullEdge,
    length: f64,
}

impl QueuedEdge {
    fn new(edge: HullEdge, points: &[Point2<f64>]) -> Self {
        let length = edge.length(points);
        Self { edge, length }
    }
}

impl PartialEq for QueuedEdge {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEdge {}

impl Ord for QueuedEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        // Longest first out of the max-heap; index pairs break length ties so
        // processing order is fully deterministic.
        self.length
            .total_cmp(&other.length)
            .then_with(|| self.edge.key().cmp(&other.edge.key()))
    }
}

impl PartialOrd for QueuedEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Extract a concave hull from a point cloud and its convex hull.
///
/// `convex_hull` is the cyclic sequence of point indices describing the
/// convex hull boundary (without a repeated closing index); it is supplied by
/// an external convex hull routine. Every point index not on the convex hull
/// is an interior candidate for digging. A candidate set that never triggers
/// digging yields the convex hull itself, which is a valid result.
///
/// The function is pure and deterministic: no randomness is involved, and
/// equal inputs always produce the same hull.
///
/// # Errors
///
/// Fails with [`GeomError::InvalidArgument`] if `points` is empty,
/// `convex_hull` has fewer than 3 entries, references an out-of-range or
/// repeated-consecutive index, or either threshold is not positive.
///
/// # Example
///
/// ```
/// use atoll::hull::{concave_hull, ConcaveHullOptions};
/// use nalgebra::Point2;
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(10.0, 0.0),
///     Point2::new(10.0, 10.0),
///     Point2::new(0.0, 10.0),
///     Point2::new(5.0, 5.0),
/// ];
/// let hull = concave_hull(&points, &[0, 1, 2, 3], &ConcaveHullOptions::new(5.0)).unwrap();
/// assert!(hull.edges.len() >= 4);
/// ```
pub fn concave_hull(
    points: &[Point2<f64>],
    convex_hull: &[usize],
    options: &ConcaveHullOptions,
) -> Result<ConcaveHull> {
    if points.is_empty() {
        return Err(GeomError::invalid_arg("points", 0, "point buffer is empty"));
    }
    if convex_hull.len() < 3 {
        return Err(GeomError::invalid_arg(
            "convex_hull",
            convex_hull.len(),
            "needs at least 3 point indices",
        ));
    }
    for &i in convex_hull {
        if i >= points.len() {
            return Err(GeomError::invalid_arg(
                "convex_hull",
                i,
                "index out of range of the point buffer",
            ));
        }
    }
    if options.concavity_distance <= 0.0 {
        return Err(GeomError::invalid_arg(
            "concavity_distance",
            options.concavity_distance,
            "must be positive",
        ));
    }
    if options.max_interior_angle_degrees <= 0.0 {
        return Err(GeomError::invalid_arg(
            "max_interior_angle_degrees",
            options.max_interior_angle_degrees,
            "must be positive",
        ));
    }

    // Seed the work queue with the convex hull edges (cyclic wrap).
    let mut queue: BinaryHeap<QueuedEdge> = BinaryHeap::with_capacity(convex_hull.len());
    for i in 0..convex_hull.len() {
        let a = convex_hull[i];
        let b = convex_hull[(i + 1) % convex_hull.len()];
        if a == b {
            return Err(GeomError::invalid_arg(
                "convex_hull",
                a,
                "consecutive indices form a degenerate edge",
            ));
        }
        queue.push(QueuedEdge::new(HullEdge::new(a, b), points));
    }

    // Every point not on the convex hull starts as an interior candidate.
    let on_hull: HashSet<usize> = convex_hull.iter().copied().collect();
    let mut interior: Vec<usize> = (0..points.len()).filter(|i| !on_hull.contains(i)).collect();

    let mut finalized: Vec<HullEdge> = Vec::new();
    while let Some(entry) = queue.pop() {
        // Short edges already hug the point cloud.
        if entry.length <= options.concavity_distance {
            finalized.push(entry.edge);
            continue;
        }

        let mut dug = false;
        if let Some((candidate, score)) = best_candidate(&entry.edge, &queue, &interior, points) {
            if score < options.max_interior_angle_degrees {
                let first = HullEdge::new(entry.edge.a, candidate);
                let second = HullEdge::new(entry.edge.b, candidate);
                if !blocked_by_finalized(&first, &finalized, points)
                    && !blocked_by_finalized(&second, &finalized, points)
                {
                    queue.push(QueuedEdge::new(first, points));
                    queue.push(QueuedEdge::new(second, points));
                    interior.retain(|&i| i != candidate);
                    dug = true;
                }
            }
        }

        if !dug {
            finalized.push(entry.edge);
        }
    }

    // Boundary indices in first-seen order over the finalized edges.
    let mut boundary = Vec::new();
    for edge in &finalized {
        if !boundary.contains(&edge.a) {
            boundary.push(edge.a);
        }
        if !boundary.contains(&edge.b) {
            boundary.push(edge.b);
        }
    }

    Ok(ConcaveHull {
        edges: finalized,
        boundary,
    })
}

/// Pick the interior candidate with the smallest maximal endpoint angle.
///
/// Only candidates whose midpoint distance to `edge` is no greater than
/// their distance to every other edge still in the work queue are considered,
/// so distant interior points cannot be claimed by the wrong edge. Returns
/// the winning point index and its angle score in degrees.
fn best_candidate(
    edge: &HullEdge,
    queue: &BinaryHeap<QueuedEdge>,
    interior: &[usize],
    points: &[Point2<f64>],
) -> Option<(usize, f64)> {
    let pa = points[edge.a];
    let pb = points[edge.b];
    let mid = edge.midpoint(points);

    let mut best: Option<(usize, f64)> = None;
    for &candidate in interior {
        let p = points[candidate];
        let dist = (p - mid).norm();

        let claimed_elsewhere = queue
            .iter()
            .any(|other| (p - other.edge.midpoint(points)).norm() < dist);
        if claimed_elsewhere {
            continue;
        }

        let at_a = geom::angle_between_degrees(&(p - pa), &(pb - pa));
        let at_b = geom::angle_between_degrees(&(p - pb), &(pa - pb));
        let score = at_a.max(at_b);
        if best.map_or(true, |(_, s)| score < s) {
            best = Some((candidate, score));
        }
    }
    best
}

/// Whether `edge` crosses any finalized edge.
fn blocked_by_finalized(edge: &HullEdge, finalized: &[HullEdge], points: &[Point2<f64>]) -> bool {
    let p1 = points[edge.a];
    let p2 = points[edge.b];
    finalized
        .iter()
        .any(|other| crosses(&p1, &p2, &points[other.a], &points[other.b]))
}

/// Whether segment `(p1, p2)` intersects segment `(q1, q2)`, ignoring contact
/// that happens exactly at `q1` or `q2`.
///
/// Replacement edges legitimately meet already-final edges at shared hull
/// vertices; only crossings away from those endpoints reject a dig.
fn crosses(p1: &Point2<f64>, p2: &Point2<f64>, q1: &Point2<f64>, q2: &Point2<f64>) -> bool {
    let d1 = geom::orient(p1, p2, q1);
    let d2 = geom::orient(p1, p2, q2);
    let d3 = geom::orient(q1, q2, p1);
    let d4 = geom::orient(q1, q2, p2);

    if opposite_signs(d1, d2) && opposite_signs(d3, d4) {
        return true;
    }

    if d1 == 0.0 && d2 == 0.0 && d3 == 0.0 && d4 == 0.0 {
        return collinear_overlap(p1, p2, q1, q2);
    }

    // An endpoint of the tested segment resting on the interior of (q1, q2)
    // is a real obstruction; contact at q1/q2 themselves is not.
    (d3 == 0.0 && geom::strictly_between(q1, p1, q2))
        || (d4 == 0.0 && geom::strictly_between(q1, p2, q2))
}

#[inline]
fn opposite_signs(x: f64, y: f64) -> bool {
    (x > 0.0 && y < 0.0) || (x < 0.0 && y > 0.0)
}

/// Overlap test for two segments already known to be collinear. Touching at a
/// single shared point does not count as overlap.
fn collinear_overlap(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
) -> bool {
    // Project on the axis with the larger extent to avoid degenerate spans.
    let horizontal = (q2.x - q1.x).abs() >= (q2.y - q1.y).abs();
    let (p_lo, p_hi, q_lo, q_hi) = if horizontal {
        (
            p1.x.min(p2.x),
            p1.x.max(p2.x),
            q1.x.min(q2.x),
            q1.x.max(q2.x),
        )
    } else {
        (
            p1.y.min(p2.y),
            p1.y.max(p2.y),
            q1.y.min(q2.y),
            q1.y.max(q2.y),
        )
    };
    p_hi.min(q_hi) - p_lo.max(q_lo) > 0.0
}
