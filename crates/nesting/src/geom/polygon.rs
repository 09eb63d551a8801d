//! Simple polygons with CCW-ordered vertices.

use super::ivec::IntegerVector;
use super::point::Point;
use super::rect::AxisAlignedRectangle;
use super::segment::{segment_intersection, DirectedLineSegment};

/// A simple polygon, vertices stored in CCW order.
///
/// Invariant (caller-enforced, checked by [`Polygon::is_simple`] /
/// [`Polygon::signed_area`] at the driver boundary rather than on every
/// construction): edge `i` runs from vertex `i` to vertex `(i+1) mod n`, and
/// the vertex order is counter-clockwise.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// Build a polygon from vertices, reordering them to CCW if they were
    /// given CW. Does not otherwise validate simplicity.
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut poly = Self { vertices };
        if poly.signed_area() < 0.0 {
            poly.vertices.reverse();
        }
        poly
    }

    /// Build without any CCW correction; used internally where the caller
    /// already guarantees orientation (e.g. a convex-hull builder).
    pub fn from_ccw_unchecked(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Circular index access: `vertex(i)` for any `i`, wrapped modulo `len()`.
    #[inline]
    pub fn vertex(&self, i: isize) -> Point {
        let n = self.vertices.len() as isize;
        let idx = ((i % n) + n) % n;
        self.vertices[idx as usize]
    }

    /// Directed edge `i`, from vertex `i` to vertex `i+1`.
    #[inline]
    pub fn edge(&self, i: usize) -> DirectedLineSegment {
        DirectedLineSegment::new(self.vertex(i as isize), self.vertex(i as isize + 1))
    }

    pub fn edges(&self) -> impl Iterator<Item = DirectedLineSegment> + '_ {
        (0..self.vertices.len()).map(move |i| self.edge(i))
    }

    /// Interior angle at vertex `i`, in `(0, 2*PI)`; `< PI` is convex.
    pub fn inside_angle(&self, i: usize) -> f64 {
        let prev = self.vertex(i as isize - 1);
        let cur = self.vertex(i as isize);
        let next = self.vertex(i as isize + 1);
        let v1 = prev - cur;
        let v2 = next - cur;
        let cross = v1.cross(v2);
        let dot = v1.dot(v2);
        let angle = cross.atan2(dot);
        // atan2 gives the turn angle in (-PI, PI]; the CCW interior angle is
        // PI minus that turn (reflex when the raw angle is negative).
        let interior = std::f64::consts::PI - angle;
        if interior <= 0.0 {
            interior + std::f64::consts::TAU
        } else if interior > std::f64::consts::TAU {
            interior - std::f64::consts::TAU
        } else {
            interior
        }
    }

    #[inline]
    pub fn is_convex_vertex(&self, i: usize) -> bool {
        self.inside_angle(i) < std::f64::consts::PI
    }

    /// Shoelace signed area (positive for CCW).
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % n];
            sum += p.cross(q);
        }
        sum * 0.5
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// `p` is inside `self` iff it is left of every CCW edge (spec.md §4.1).
    pub fn contains(&self, p: Point) -> bool {
        (0..self.vertices.len()).all(|i| self.edge(i).is_left_of(p))
    }

    /// `p` is inside with tolerance `eps` (boundary points within `eps` of an
    /// edge still count as inside).
    pub fn contains_eps(&self, p: Point, eps: f64) -> bool {
        (0..self.vertices.len()).all(|i| self.edge(i).side(p) < eps)
    }

    pub fn translate(&self, d: Point) -> Polygon {
        Polygon::from_ccw_unchecked(self.vertices.iter().map(|&v| v + d).collect())
    }

    pub fn translate_ivec(&self, d: IntegerVector, r: i64) -> Polygon {
        self.translate(d.to_point(r))
    }

    pub fn rotate_around(&self, origin: Point, theta: f64) -> Polygon {
        let rotated: Vec<Point> = self
            .vertices
            .iter()
            .map(|&v| v.rotate_around(origin, theta))
            .collect();
        // A rotation preserves orientation, but reverse defensively if the
        // caller passed a reflection-equivalent angle.
        Polygon::new(rotated)
    }

    /// Rotate 180° about the bounding-box center (the "Rotated" orientation
    /// throughout this crate, spec.md GLOSSARY).
    pub fn rotate_180(&self) -> Polygon {
        let center = self.bounding_box().center();
        Polygon::from_ccw_unchecked(
            self.vertices
                .iter()
                .map(|&v| v.rotate_180_around(center))
                .collect(),
        )
    }

    pub fn bounding_box(&self) -> AxisAlignedRectangle {
        AxisAlignedRectangle::bounding(&self.vertices)
    }

    /// Intrinsic reference point: the bounding-box bottom-left corner.
    pub fn reference_point(&self) -> Point {
        self.bounding_box().bottom_left
    }

    /// Translate so the bounding-box center is the origin.
    pub fn normalize(&self) -> Polygon {
        let center = self.bounding_box().center();
        self.translate(-center)
    }

    /// Lowest-then-leftmost vertex (the reference point convention used by
    /// the no-fit-polygon construction, spec.md §4.5).
    pub fn lowest_leftmost_vertex(&self) -> Point {
        self.vertices
            .iter()
            .copied()
            .reduce(|a, b| {
                if b.y < a.y || (b.y == a.y && b.x < a.x) {
                    b
                } else {
                    a
                }
            })
            .expect("polygon must have at least one vertex")
    }

    /// Highest-then-rightmost vertex.
    pub fn highest_rightmost_vertex(&self) -> Point {
        self.vertices
            .iter()
            .copied()
            .reduce(|a, b| {
                if b.y > a.y || (b.y == a.y && b.x > a.x) {
                    b
                } else {
                    a
                }
            })
            .expect("polygon must have at least one vertex")
    }

    /// `true` iff no two non-adjacent edges intersect and the polygon has at
    /// least 3 vertices with nonzero area. Brute-force `O(n^2)`, used only at
    /// the INVALID_INPUT validation boundary (spec.md §7), never in the hot
    /// placement loop.
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        if self.area() < 1e-12 {
            return false;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if segment_intersection(self.edge(i), self.edge(j), 1e-9).is_some() {
                    return false;
                }
            }
        }
        true
    }

    /// Brute-force `O(n*m)` polygon-polygon intersection test (spec.md §4.1):
    /// true if any edge pair crosses, or one polygon's vertex lies strictly
    /// inside the other.
    pub fn intersects(&self, other: &Polygon) -> bool {
        for e1 in self.edges() {
            for e2 in other.edges() {
                if segment_intersection(e1, e2, 1e-9).is_some() {
                    return true;
                }
            }
        }
        if let Some(&p) = self.vertices.first() {
            if other.contains(p) {
                return true;
            }
        }
        if let Some(&p) = other.vertices.first() {
            if self.contains(p) {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn ccw_square_has_positive_area() {
        let sq = square();
        assert!((sq.area() - 1.0).abs() < 1e-12);
        assert!(sq.signed_area() > 0.0);
    }

    #[test]
    fn cw_input_gets_reordered_to_ccw() {
        let cw = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]);
        assert!(cw.signed_area() > 0.0);
    }

    #[test]
    fn contains_interior_and_excludes_exterior() {
        let sq = square();
        assert!(sq.contains(Point::new(0.5, 0.5)));
        assert!(!sq.contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn rotate_180_is_involution() {
        let sq = square();
        let twice = sq.rotate_180().rotate_180();
        for (a, b) in sq.vertices().iter().zip(twice.vertices()) {
            assert!(a.distance(*b) < 1e-9);
        }
    }

    #[test]
    fn normalize_centers_bbox_at_origin() {
        let sq = square().translate(Point::new(10.0, -5.0));
        let n = sq.normalize();
        let bb = n.bounding_box();
        assert!(bb.center().distance(Point::zero()) < 1e-9);
    }

    #[test]
    fn convex_square_has_four_convex_vertices() {
        let sq = square();
        for i in 0..4 {
            assert!(sq.is_convex_vertex(i));
        }
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(256))]

        /// Rotate180 involution (spec.md §8): rotating twice about the same
        /// center returns every vertex to its original position.
        #[test]
        fn prop_rotate_180_is_involution(
            coords in prop::collection::vec((-50.0f64..50.0, -50.0f64..50.0), 3..12)
        ) {
            let verts: Vec<Point> = coords.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let poly = Polygon::new(verts);
            if poly.area() > 1e-6 {
                let twice = poly.rotate_180().rotate_180();
                for (a, b) in poly.vertices().iter().zip(twice.vertices()) {
                    prop_assert!(a.distance(*b) < 1e-6);
                }
            }
        }
    }

    #[test]
    fn self_intersecting_bowtie_is_not_simple() {
        let bowtie = Polygon::from_ccw_unchecked(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        assert!(!bowtie.is_simple());
    }

    #[test]
    fn disjoint_squares_do_not_intersect() {
        let a = square();
        let b = square().translate(Point::new(5.0, 5.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn overlapping_squares_intersect() {
        let a = square();
        let b = square().translate(Point::new(0.5, 0.5));
        assert!(a.intersects(&b));
    }
}
