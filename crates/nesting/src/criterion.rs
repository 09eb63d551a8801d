//! Nesting criterion — area of union hull (spec.md §4.9).
//!
//! Two interchangeable scoring functions over candidate positions:
//! minimizing convex-hull area, or minimizing smallest-enclosing-circle
//! area. Both are a greedy proxy for keeping the packing compact.

use super::geom::ivec::IntegerVector;
use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::hull::{convex_hull, convex_hull_from_ordered};
use super::sec::smallest_enclosing_circle;
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Lexicographic `(x, y)` ordering key for real points, matching the
/// ordered-set requirement in spec.md §5. Assumes no `NaN` coordinates,
/// which this crate never produces.
#[derive(Clone, Copy, Debug)]
struct Key(Point);

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.x == other.0.x && self.0.y == other.0.y
    }
}
impl Eq for Key {}
impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .partial_cmp(&other.0.x)
            .unwrap_or(Ordering::Equal)
            .then(self.0.y.partial_cmp(&other.0.y).unwrap_or(Ordering::Equal))
    }
}

/// Shared capability: add a placed polygon's vertices to the running state,
/// and score a candidate position for a probe polygon.
pub trait NestingCriterion {
    fn add_polygon(&mut self, pos: Point, polygon: &Polygon);

    /// Evaluate every candidate in `positions` (already in lexicographic
    /// order) with `probe` translated there; return the best
    /// `(position, score)`, `None` if `positions` is empty. Ties are broken
    /// by iteration order (spec.md §4.9, §5).
    fn evaluate(
        &self,
        positions: &BTreeSet<IntegerVector>,
        raster_step: i64,
        probe: &Polygon,
    ) -> Option<(IntegerVector, f64)>;
}

/// Maintains the running convex hull of every placed vertex so far,
/// re-derived after each `add_polygon` via the presorted hull algorithm —
/// `hull(hull(H) u new_points) == hull(H u new_points)`, so collapsing `H`
/// to just its hull vertices after each insertion is exact, not lossy, for
/// every future hull computation (spec.md §4.9, §8 "Convex-hull
/// idempotence").
#[derive(Clone, Debug, Default)]
pub struct ConvexHullAreaCriterion {
    hull_points: BTreeSet<Key>,
}

impl ConvexHullAreaCriterion {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NestingCriterion for ConvexHullAreaCriterion {
    fn add_polygon(&mut self, pos: Point, polygon: &Polygon) {
        for &v in polygon.vertices() {
            self.hull_points.insert(Key(v + pos));
        }
        if let Some(h) = convex_hull_from_ordered(self.hull_points.iter().map(|k| k.0)) {
            self.hull_points = h.vertices().iter().copied().map(Key).collect();
        }
    }

    fn evaluate(
        &self,
        positions: &BTreeSet<IntegerVector>,
        raster_step: i64,
        probe: &Polygon,
    ) -> Option<(IntegerVector, f64)> {
        let mut best: Option<(IntegerVector, f64)> = None;
        for &pos in positions {
            let mut pts: Vec<Point> = self.hull_points.iter().map(|k| k.0).collect();
            pts.extend(probe.translate(pos.to_point(raster_step)).vertices().iter().copied());
            let area = convex_hull(&pts).map(|h| h.area()).unwrap_or(0.0);
            if best.as_ref().map(|(_, b)| area < *b).unwrap_or(true) {
                best = Some((pos, area));
            }
        }
        best
    }
}

/// Same shape as [`ConvexHullAreaCriterion`], but scores by smallest
/// enclosing circle area. The convex hull is still maintained internally as
/// an optimization bounding the input to the SEC step (spec.md §4.9).
#[derive(Clone, Debug)]
pub struct SecAreaCriterion {
    hull_points: BTreeSet<Key>,
    rng_seed: u64,
}

impl SecAreaCriterion {
    pub fn new(rng_seed: u64) -> Self {
        Self {
            hull_points: BTreeSet::new(),
            rng_seed,
        }
    }
}

impl NestingCriterion for SecAreaCriterion {
    fn add_polygon(&mut self, pos: Point, polygon: &Polygon) {
        for &v in polygon.vertices() {
            self.hull_points.insert(Key(v + pos));
        }
        if let Some(h) = convex_hull_from_ordered(self.hull_points.iter().map(|k| k.0)) {
            self.hull_points = h.vertices().iter().copied().map(Key).collect();
        }
    }

    fn evaluate(
        &self,
        positions: &BTreeSet<IntegerVector>,
        raster_step: i64,
        probe: &Polygon,
    ) -> Option<(IntegerVector, f64)> {
        let mut best: Option<(IntegerVector, f64)> = None;
        for &pos in positions {
            let mut pts: Vec<Point> = self.hull_points.iter().map(|k| k.0).collect();
            pts.extend(probe.translate(pos.to_point(raster_step)).vertices().iter().copied());
            let area = smallest_enclosing_circle(&pts, self.rng_seed).area();
            if best.as_ref().map(|(_, b)| area < *b).unwrap_or(true) {
                best = Some((pos, area));
            }
        }
        best
    }
}
