//! Polygonized parallel curve and offset curve (spec.md §4.6).
//!
//! Two steps: (1) build the parallel curve at distance `r` — a straight
//! segment offset outward from each edge, joined at convex (and reflex)
//! vertices by a discretized circular arc — which may self-intersect at
//! reflex vertices; (2) iteratively delete self-intersection loops until a
//! full scan finds none.
//!
//! spec.md §9 replaces the source's checked-dynamic-cast dispatch on the
//! offset-curve polygon with an explicit tagged variant so translation and
//! rotation stay ordinary match arms instead of runtime type tests.

use super::geom::arc::CircularArc;
use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::geom::segment::{segment_intersection, DirectedLineSegment};
use super::hull::convex_hull;

/// A polygon that is either a plain part outline or an offset curve derived
/// from one at a known clearance. Translation and 180° rotation both keep
/// the tag, so downstream code never needs to ask "is this an offset
/// curve?" before transforming it.
#[derive(Clone, Debug)]
pub enum TaggedPolygon {
    Plain(Polygon),
    Offset { polygon: Polygon, clearance: f64 },
}

impl TaggedPolygon {
    pub fn polygon(&self) -> &Polygon {
        match self {
            TaggedPolygon::Plain(p) => p,
            TaggedPolygon::Offset { polygon, .. } => polygon,
        }
    }

    pub fn clearance(&self) -> f64 {
        match self {
            TaggedPolygon::Plain(_) => 0.0,
            TaggedPolygon::Offset { clearance, .. } => *clearance,
        }
    }

    pub fn translate(&self, d: Point) -> TaggedPolygon {
        match self {
            TaggedPolygon::Plain(p) => TaggedPolygon::Plain(p.translate(d)),
            TaggedPolygon::Offset { polygon, clearance } => TaggedPolygon::Offset {
                polygon: polygon.translate(d),
                clearance: *clearance,
            },
        }
    }

    pub fn rotate_180(&self) -> TaggedPolygon {
        match self {
            TaggedPolygon::Plain(p) => TaggedPolygon::Plain(p.rotate_180()),
            TaggedPolygon::Offset { polygon, clearance } => TaggedPolygon::Offset {
                polygon: polygon.rotate_180(),
                clearance: *clearance,
            },
        }
    }
}

/// Outward unit normal of edge `i` of a CCW polygon: a 90° clockwise turn of
/// the edge vector (the convention matching
/// [`super::geom::segment::DirectedLineSegment::is_left_of`], where the
/// polygon interior is to the *left* of each directed edge).
fn outward_normal(p: &Polygon, i: usize) -> Point {
    let e = p.edge(i).vector();
    let len = e.norm().max(1e-15);
    Point::new(e.y / len, -e.x / len)
}

/// Step 1 of spec.md §4.6: the polygonized parallel curve at distance `r`,
/// possibly self-intersecting at reflex vertices. `delta` bounds the
/// chord-to-arc normal error at each fillet.
fn polygonized_parallel_curve(p: &Polygon, r: f64, delta: f64) -> Vec<Point> {
    let n = p.len();
    let normals: Vec<Point> = (0..n).map(|i| outward_normal(p, i)).collect();
    let mut out = Vec::with_capacity(n * 2);
    for i in 0..n {
        let vi = p.vertex(i as isize);
        let vi1 = p.vertex(i as isize + 1);
        let a = vi + normals[i] * r;
        let b = vi1 + normals[i] * r;
        out.push(a);
        out.push(b);
        let next_normal = normals[(i + 1) % n];
        let arc_end = vi1 + next_normal * r;
        let arc = CircularArc::from_endpoints(vi1, r, b, arc_end);
        out.extend(arc.discretize_interior(delta));
    }
    out
}

/// Step 2 of spec.md §4.6: iteratively delete self-intersection loops.
/// Starts the scan from a convex-hull vertex (guaranteed to lie on the true
/// outer boundary), per spec.md §4.6.
fn remove_self_intersections(candidate: Vec<Point>) -> Vec<Point> {
    let mut verts = candidate;
    if let Some(hull) = convex_hull(&verts) {
        if let Some(&start) = hull.vertices().first() {
            if let Some(idx) = verts.iter().position(|p| p.distance(start) < 1e-9) {
                verts.rotate_left(idx);
            }
        }
    }

    let cap = verts.len().max(1) * 2 + 16;
    for _ in 0..cap {
        let n = verts.len();
        if n < 4 {
            break;
        }
        let mut crossing: Option<(usize, usize, Point)> = None;
        'scan: for i in 0..n {
            for j in 0..n {
                let adjacent = j == i || j == (i + 1) % n || i == (j + 1) % n;
                if adjacent {
                    continue;
                }
                let e_i = DirectedLineSegment::new(verts[i], verts[(i + 1) % n]);
                let e_j = DirectedLineSegment::new(verts[j], verts[(j + 1) % n]);
                if let Some(p) = segment_intersection(e_i, e_j, 1e-9) {
                    crossing = Some((i, j, p));
                    break 'scan;
                }
            }
        }
        match crossing {
            None => break,
            Some((i, j, p)) => {
                let (lo, hi) = if i < j { (i, j) } else { (j, i) };
                let mut next = Vec::with_capacity(n - (hi - lo) + 1);
                next.extend_from_slice(&verts[0..=lo]);
                next.push(p);
                next.extend_from_slice(&verts[hi + 1..]);
                verts = next;
            }
        }
    }
    verts
}

/// Offset curve `O(P)` at clearance `r` (spec.md §4.6, GLOSSARY): the
/// polygonized parallel curve with self-intersections removed, tagged with
/// its clearance so callers can recover the source distance.
pub fn offset_curve(part: &Polygon, r: f64, delta: f64) -> TaggedPolygon {
    let candidate = polygonized_parallel_curve(part, r, delta);
    let simple = remove_self_intersections(candidate);
    TaggedPolygon::Offset {
        polygon: Polygon::from_ccw_unchecked(simple),
        clearance: r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn offset_of_square_contains_the_square() {
        let sq = unit_square();
        let offset = offset_curve(&sq, 0.2, 0.05);
        let poly = offset.polygon();
        assert!(poly.len() >= 4);
        // A sample of the original square's boundary must lie inside the
        // offset polygon, per the containment invariant (spec.md §8).
        for p in sq.vertices() {
            assert!(poly.contains_eps(*p, 1e-6));
        }
    }

    #[test]
    fn offset_curve_is_tagged_with_clearance() {
        let sq = unit_square();
        let offset = offset_curve(&sq, 0.5, 0.1);
        assert!((offset.clearance() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn translate_preserves_tag_and_clearance() {
        let sq = unit_square();
        let offset = offset_curve(&sq, 0.3, 0.1);
        let moved = offset.translate(Point::new(5.0, 5.0));
        assert!((moved.clearance() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn offset_vertices_at_least_r_from_original_edges() {
        let sq = unit_square();
        let r = 0.3;
        let offset = offset_curve(&sq, r, 0.05);
        for v in offset.polygon().vertices() {
            // distance from v to the nearest edge of the original square
            let mut min_d = f64::INFINITY;
            for i in 0..sq.len() {
                let e = sq.edge(i);
                let line = crate::geom::line::Line::through(e.a, e.b);
                min_d = min_d.min(line.signed_distance(*v).abs());
            }
            assert!(min_d >= r - 1e-3, "vertex {:?} only {} from original", v, min_d);
        }
    }
}
