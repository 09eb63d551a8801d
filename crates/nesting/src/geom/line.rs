//! Infinite lines in coordinate form `a*x + b*y = c`.

use super::point::Point;

/// A line `a*x + b*y = c`. Not required to be normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Line {
    #[inline]
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// The unique line through two distinct points.
    pub fn through(p: Point, q: Point) -> Self {
        let a = q.y - p.y;
        let b = p.x - q.x;
        let c = a * p.x + b * p.y;
        Self::new(a, b, c)
    }

    /// Intersection of two lines via
    /// `(c1*b2 - c2*b1) / (a1*b2 - a2*b1)`, `None` ("parallel") when the
    /// denominator is (numerically) zero, per spec.md §4.1.
    pub fn intersect(self, other: Line) -> Option<Point> {
        let denom = self.a * other.b - other.a * self.b;
        if denom.abs() < 1e-12 {
            return None;
        }
        let x = (self.c * other.b - other.c * self.b) / denom;
        let y = (self.a * other.c - other.a * self.c) / denom;
        Some(Point::new(x, y))
    }

    /// Signed distance from `p` to this line (positive on the side the
    /// normal `(a, b)` points toward).
    pub fn signed_distance(self, p: Point) -> f64 {
        let norm = (self.a * self.a + self.b * self.b).sqrt();
        if norm < 1e-15 {
            return 0.0;
        }
        (self.a * p.x + self.b * p.y - self.c) / norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perpendicular_lines_intersect_at_origin() {
        let l1 = Line::through(Point::new(-1.0, 0.0), Point::new(1.0, 0.0));
        let l2 = Line::through(Point::new(0.0, -1.0), Point::new(0.0, 1.0));
        let p = l1.intersect(l2).unwrap();
        assert!(p.distance(Point::zero()) < 1e-9);
    }

    #[test]
    fn parallel_lines_return_none() {
        let l1 = Line::through(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let l2 = Line::through(Point::new(0.0, 1.0), Point::new(1.0, 1.0));
        assert!(l1.intersect(l2).is_none());
    }

    #[test]
    fn signed_distance_sign_matches_normal_direction() {
        let l = Line::through(Point::new(0.0, 0.0), Point::new(0.0, 1.0));
        // normal is (1, 0): points with larger x are on the positive side
        assert!(l.signed_distance(Point::new(1.0, 0.0)) > 0.0);
        assert!(l.signed_distance(Point::new(-1.0, 0.0)) < 0.0);
    }
}
