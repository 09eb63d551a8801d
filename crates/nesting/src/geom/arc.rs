//! Circular arcs, used only to discretize the offset curve's convex-vertex
//! fillets (spec.md §4.6).

use super::point::Point;

/// A circular arc from `start` to `end`, both at distance `radius` from
/// `center`, sweeping CCW through `sweep_angle` radians (`0 < sweep_angle <
/// 2*PI`).
#[derive(Clone, Copy, Debug)]
pub struct CircularArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl CircularArc {
    pub fn new(center: Point, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            sweep_angle,
        }
    }

    /// Build the arc swept CCW from `start` to `end` around `center`
    /// (both already known to lie at `radius` from `center`).
    pub fn from_endpoints(center: Point, radius: f64, start: Point, end: Point) -> Self {
        let a0 = (start - center).y.atan2((start - center).x);
        let mut a1 = (end - center).y.atan2((end - center).x);
        while a1 < a0 {
            a1 += std::f64::consts::TAU;
        }
        Self::new(center, radius, a0, a1 - a0)
    }

    /// Maximum chord half-angle such that the chord-to-arc normal error is
    /// at most `delta`, per spec.md §4.6:
    /// `alpha_max = 2*asin(sqrt((r+delta)^2 - r^2) / (r+delta))`.
    pub fn max_sub_angle(radius: f64, delta: f64) -> f64 {
        let rd = radius + delta;
        if rd <= 0.0 {
            return std::f64::consts::TAU;
        }
        let inner = ((rd * rd - radius * radius).max(0.0)).sqrt() / rd;
        2.0 * inner.clamp(-1.0, 1.0).asin()
    }

    /// Discretize into `n = ceil(sweep_angle / alpha_max)` equal sub-angles,
    /// returning the interior vertices (excludes the shared endpoints, which
    /// the caller already has from the adjacent parallel segments).
    pub fn discretize_interior(self, delta: f64) -> Vec<Point> {
        if self.sweep_angle <= 1e-12 {
            return Vec::new();
        }
        let alpha_max = Self::max_sub_angle(self.radius, delta).max(1e-9);
        let n = (self.sweep_angle / alpha_max).ceil().max(1.0) as usize;
        let mut out = Vec::with_capacity(n.saturating_sub(1));
        for k in 1..n {
            let theta = self.start_angle + self.sweep_angle * (k as f64) / (n as f64);
            out.push(self.center + Point::new(self.radius * theta.cos(), self.radius * theta.sin()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discretization_count_grows_with_sweep() {
        let small = CircularArc::new(Point::zero(), 10.0, 0.0, 0.2).discretize_interior(1.0);
        let large = CircularArc::new(Point::zero(), 10.0, 0.0, std::f64::consts::PI).discretize_interior(1.0);
        assert!(large.len() >= small.len());
    }

    #[test]
    fn interior_points_lie_on_circle() {
        let arc = CircularArc::new(Point::new(1.0, 2.0), 5.0, 0.0, std::f64::consts::FRAC_PI_2);
        for p in arc.discretize_interior(0.5) {
            assert!((p.distance(Point::new(1.0, 2.0)) - 5.0).abs() < 1e-9);
        }
    }
}
