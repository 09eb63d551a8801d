//! No-fit polygon of two convex polygons (spec.md §4.5).
//!
//! `NFP(A, B)` is the locus of positions of `B`'s reference point such that
//! `B` touches but does not overlap the fixed polygon `A`. For convex `A, B`
//! this is the Minkowski sum `A ⊕ (-B)`, built here by angle-sorted edge
//! merging: concatenate all edges of `A` with all *reverse* edges of `B`
//! (i.e. `-edge` for each edge of `B`, which is exactly the edge set of the
//! point-reflected `-B`), sort by direction angle in `[0, 2*PI)`, and walk
//! from `A`'s reference point summing edge vectors in that order.

use super::geom::point::Point;
use super::geom::polygon::Polygon;

/// Result of a no-fit-polygon construction, carrying the reference points
/// used so callers (the raster builder, spec.md §4.7 step 4) can translate
/// between a placement offset and an NFP-relative position.
#[derive(Clone, Debug)]
pub struct NoFitResult {
    pub polygon: Polygon,
    /// Fixed polygon's reference point: its lowest-then-leftmost vertex.
    pub ref_fixed: Point,
    /// Orbiting polygon's reference point: its highest-then-rightmost vertex.
    pub ref_orbiting: Point,
}

#[inline]
fn angle01(v: Point) -> f64 {
    let a = v.y.atan2(v.x);
    if a < 0.0 {
        a + std::f64::consts::TAU
    } else {
        a
    }
}

/// Build the no-fit polygon of fixed convex `a` against orbiting convex `b`.
/// Both must already be convex (callers pass convex hulls, spec.md §4.7
/// step 1); this does not check convexity.
pub fn no_fit_polygon(a: &Polygon, b: &Polygon) -> NoFitResult {
    let ref_fixed = a.lowest_leftmost_vertex();
    let ref_orbiting = b.highest_rightmost_vertex();

    let mut dirs: Vec<Point> = Vec::with_capacity(a.len() + b.len());
    for i in 0..a.len() {
        dirs.push(a.edge(i).vector());
    }
    for i in 0..b.len() {
        dirs.push(-b.edge(i).vector());
    }
    dirs.sort_by(|v1, v2| {
        angle01(*v1)
            .partial_cmp(&angle01(*v2))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut verts = Vec::with_capacity(dirs.len());
    let mut cur = ref_fixed;
    verts.push(cur);
    for d in dirs.iter().take(dirs.len().saturating_sub(1)) {
        cur = cur + *d;
        verts.push(cur);
    }

    NoFitResult {
        polygon: Polygon::from_ccw_unchecked(verts),
        ref_fixed,
        ref_orbiting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_at(origin: Point) -> Polygon {
        Polygon::from_ccw_unchecked(vec![
            origin,
            origin + Point::new(1.0, 0.0),
            origin + Point::new(1.0, 1.0),
            origin + Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn nfp_of_two_unit_squares_is_a_2x2_square() {
        let a = unit_square_at(Point::zero());
        let b = unit_square_at(Point::zero());
        let nfp = no_fit_polygon(&a, &b);
        assert_eq!(nfp.polygon.len(), 4);
        assert!((nfp.polygon.area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn nfp_is_closed() {
        let a = unit_square_at(Point::zero());
        let b = unit_square_at(Point::new(2.0, 3.0));
        let nfp = no_fit_polygon(&a, &b);
        // Sum of all edge vectors of a closed polygon is zero.
        let mut sum = Point::zero();
        for i in 0..nfp.polygon.len() {
            sum = sum + nfp.polygon.edge(i).vector();
        }
        assert!(sum.norm() < 1e-9);
    }
}
