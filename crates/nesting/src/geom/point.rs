//! Real-valued points and vectors.
//!
//! `Point` stores its `(x, y)` coordinates directly rather than wrapping
//! `nalgebra::Vector2<f64>`; `to_vector2`/`from_vector2` exist only as an
//! interop boundary for callers that want `nalgebra` types.

use nalgebra::Vector2;
use std::ops::{Add, Mul, Neg, Sub};

/// A point (or free vector) in the real plane.
///
/// Invariant: immutable once constructed — all operations are by value and
/// return a new `Point`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    #[inline]
    pub fn to_vector2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn from_vector2(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.to_vector2().norm()
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product `self × other` (z-component of the 3D cross product).
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotate around an arbitrary origin by `theta` radians (CCW positive).
    #[inline]
    pub fn rotate_around(self, origin: Point, theta: f64) -> Point {
        let d = self - origin;
        let (s, c) = theta.sin_cos();
        Point::new(d.x * c - d.y * s, d.x * s + d.y * c) + origin
    }

    /// Rotate 180° around `origin`; equivalent to `rotate_around(origin, PI)`
    /// but exact (no trig round-off).
    #[inline]
    pub fn rotate_180_around(self, origin: Point) -> Point {
        Point::new(2.0 * origin.x - self.x, 2.0 * origin.y - self.y)
    }

    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self + (other - self) * t
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;
    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_180_is_involution() {
        let origin = Point::new(3.0, -1.0);
        let p = Point::new(5.0, 7.0);
        let once = p.rotate_180_around(origin);
        let twice = once.rotate_180_around(origin);
        assert!((twice.x - p.x).abs() < 1e-12);
        assert!((twice.y - p.y).abs() < 1e-12);
    }

    #[test]
    fn cross_sign_matches_orientation() {
        let a = Point::new(1.0, 0.0);
        let b = Point::new(0.0, 1.0);
        assert!(a.cross(b) > 0.0);
        assert!(b.cross(a) < 0.0);
    }
}
