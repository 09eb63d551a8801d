//! Convex hull: contour construction + monotone correction (spec.md §4.2).
//!
//! The two phases spec.md describes — a left-to-right sweep producing a
//! "left contour", a symmetric right-to-left sweep producing a "right
//! contour", and a monotone-correction backtracking pass that deletes any
//! vertex `v_{i+2}` not strictly left of the preceding edge — are exactly
//! Andrew's monotone chain: the lower-hull sweep *is* the left contour, the
//! upper-hull sweep *is* the right contour, and the "pop while the turn
//! isn't strictly left" loop *is* the retrace-and-delete correction,
//! interleaved with construction rather than run as a separate pass. This
//! crate keeps that interleaving (it is the standard, numerically-robust
//! form of the algorithm) rather than literally materializing an
//! uncorrected contour polygon first.
//!
//! Ties: equal `x` sort by `y` ascending, per spec.md §4.2.

use super::geom::point::Point;
use super::geom::polygon::Polygon;

/// `(b - a) x (c - a)`; positive means `a -> b -> c` turns left (CCW).
#[inline]
fn cross3(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

fn sort_xy(pts: &mut [Point]) {
    pts.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
    });
}

/// Deterministic `O(n log n)` convex hull (presort, then the presorted
/// variant below). Returns `None` if fewer than 3 distinct points survive
/// deduplication (no well-defined hull).
pub fn convex_hull(points: &[Point]) -> Option<Polygon> {
    let mut pts = points.to_vec();
    sort_xy(&mut pts);
    pts.dedup_by(|a, b| a.distance(*b) < 1e-12);
    convex_hull_presorted(&pts)
}

/// `O(n)` variant for input already sorted ascending by `(x, y)`.
pub fn convex_hull_presorted(sorted: &[Point]) -> Option<Polygon> {
    if sorted.len() < 2 {
        return None;
    }
    // Left contour: lower hull, swept left to right.
    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted {
        while lower.len() >= 2 && cross3(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0
        {
            lower.pop();
        }
        lower.push(p);
    }
    // Right contour: upper hull, swept right to left.
    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross3(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0
        {
            upper.pop();
        }
        upper.push(p);
    }
    // Concatenate, dropping the duplicated global extrema (leftmost and
    // rightmost points already closing each chain).
    lower.pop();
    upper.pop();
    if lower.len() + upper.len() < 3 {
        return None;
    }
    lower.extend(upper);
    Some(Polygon::from_ccw_unchecked(lower))
}

/// Streaming variant over an already-ordered key set — e.g. a `BTreeSet`
/// keyed by `(x, y)`, as used by the convex-hull nesting criterion
/// (spec.md §4.9) to re-derive the hull from its running vertex set after
/// every insertion. Accepts anything that yields points in ascending
/// `(x, y)` order.
pub fn convex_hull_from_ordered<I: IntoIterator<Item = Point>>(ordered: I) -> Option<Polygon> {
    let pts: Vec<Point> = ordered.into_iter().collect();
    convex_hull_presorted(&pts)
}
