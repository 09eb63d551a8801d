//! Minimum-area oriented bounding box via rotating calipers (spec.md §4.3).
//!
//! The minimum-area enclosing rectangle of a convex polygon always has one
//! side collinear with a hull edge (the classical rotating-calipers
//! theorem). Rather than track four caliper lines and their incidence
//! angles explicitly, this walks each hull edge directly, builds the
//! bounding box in that edge's frame, and keeps the minimum — the same
//! candidate set the four-caliper sweep emits, without the angle
//! bookkeeping. `O(n^2)`, fine for the part-sized polygons this crate
//! handles (tens of vertices, not point clouds).

use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::geom::rect::OrientedRectangle;

/// Minimum-area oriented bounding box of a convex polygon's vertex set.
/// `None` if `hull` has fewer than 3 vertices.
pub fn min_area_bounding_box(hull: &Polygon) -> Option<OrientedRectangle> {
    let verts = hull.vertices();
    if verts.len() < 3 {
        return None;
    }
    let mut best: Option<(f64, OrientedRectangle)> = None;
    for i in 0..verts.len() {
        let a = verts[i];
        let b = verts[(i + 1) % verts.len()];
        let edge = b - a;
        let len = edge.norm();
        if len < 1e-12 {
            continue;
        }
        let ux = edge * (1.0 / len); // unit axis along the edge
        let uy = Point::new(-ux.y, ux.x); // unit axis perpendicular (CCW)

        let mut min_u = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        for &p in verts {
            let d = p - a;
            let u = d.dot(ux);
            let v = d.dot(uy);
            min_u = min_u.min(u);
            max_u = max_u.max(u);
            min_v = min_v.min(v);
            max_v = max_v.max(v);
        }
        let area = (max_u - min_u) * (max_v - min_v);
        if best.as_ref().map(|(a, _)| area < *a).unwrap_or(true) {
            let corners = [
                a + ux * min_u + uy * min_v,
                a + ux * max_u + uy * min_v,
                a + ux * max_u + uy * max_v,
                a + ux * min_u + uy * max_v,
            ];
            best = Some((area, OrientedRectangle::new(corners)));
        }
    }
    best.map(|(_, r)| r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hull::convex_hull;

    #[test]
    fn square_mbb_equals_square_area() {
        let hull = convex_hull(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        let bb = min_area_bounding_box(&hull).unwrap();
        assert!((bb.area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn rotated_square_mbb_matches_its_own_area() {
        // A square rotated 30 degrees should still report its true area,
        // not the (larger) axis-aligned bounding box area.
        let theta = std::f64::consts::FRAC_PI_6;
        let (s, c) = theta.sin_cos();
        let base = [
            Point::new(-1.0, -1.0),
            Point::new(1.0, -1.0),
            Point::new(1.0, 1.0),
            Point::new(-1.0, 1.0),
        ];
        let rotated: Vec<Point> = base
            .iter()
            .map(|p| Point::new(p.x * c - p.y * s, p.x * s + p.y * c))
            .collect();
        let hull = convex_hull(&rotated).unwrap();
        let bb = min_area_bounding_box(&hull).unwrap();
        assert!((bb.area() - 4.0).abs() < 1e-6);
    }
}
