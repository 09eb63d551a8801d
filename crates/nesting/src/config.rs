//! Run configuration, orientation, and placement types (spec.md §6, §9).
//!
//! `NestingParameters` follows the `GeomCfg` shape used elsewhere in this
//! crate family: a plain `Copy` struct of numeric fields with a
//! hand-written `Default` matching spec.md §6's defaults, validated once at
//! driver construction rather than on every call — the source's mutable
//! global flags become fields here instead (spec.md §9).

use super::criterion::{ConvexHullAreaCriterion, NestingCriterion, SecAreaCriterion};
use super::error::NestingError;
use super::geom::ivec::IntegerVector;
use super::geom::point::Point;
use super::geom::polygon::Polygon;

/// Which scoring function drives placement choice, for the simple driver and
/// for each of the tuple driver's three sub-steps (pairs, quadruples,
/// arrangement search) alike (spec.md §6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CriterionKind {
    ConvexHullArea,
    SecArea,
}

impl CriterionKind {
    pub fn build(self, rng_seed: u64) -> Box<dyn NestingCriterion> {
        match self {
            CriterionKind::ConvexHullArea => Box::new(ConvexHullAreaCriterion::new()),
            CriterionKind::SecArea => Box::new(SecAreaCriterion::new(rng_seed)),
        }
    }
}

/// Run-wide configuration (spec.md §6). All defaults match the table there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NestingParameters {
    pub table_radius: f64,
    pub part_clearance: f64,
    pub max_normal_error: f64,
    pub raster_step: i64,
    pub criterion: CriterionKind,
    pub rng_seed: u64,
}

impl Default for NestingParameters {
    fn default() -> Self {
        Self {
            table_radius: 1320.0,
            part_clearance: 22.0,
            max_normal_error: 1.0,
            raster_step: 10,
            criterion: CriterionKind::SecArea,
            rng_seed: 0,
        }
    }
}

impl NestingParameters {
    /// CONFIG_OUT_OF_RANGE check (spec.md §7): non-positive radius,
    /// clearance, raster step, or polygonization error. Checked once at
    /// driver construction, never re-checked per call.
    pub fn validate(&self) -> Result<(), NestingError> {
        if self.table_radius <= 0.0 {
            return Err(NestingError::ConfigOutOfRange(
                "table_radius must be positive".to_string(),
            ));
        }
        if self.part_clearance <= 0.0 {
            return Err(NestingError::ConfigOutOfRange(
                "part_clearance must be positive".to_string(),
            ));
        }
        if self.max_normal_error <= 0.0 {
            return Err(NestingError::ConfigOutOfRange(
                "max_normal_error must be positive".to_string(),
            ));
        }
        if self.raster_step <= 0 {
            return Err(NestingError::ConfigOutOfRange(
                "raster_step must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// The only two orientations a part may be placed in: as given, or rotated
/// 180° about its bounding-box center (spec.md GLOSSARY "Rotated").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    N,
    R,
}

impl Orientation {
    #[inline]
    pub fn toggle(self) -> Orientation {
        match self {
            Orientation::N => Orientation::R,
            Orientation::R => Orientation::N,
        }
    }

    #[inline]
    pub fn other(self) -> Orientation {
        self.toggle()
    }

    pub fn apply(self, p: &Polygon) -> Polygon {
        match self {
            Orientation::N => p.clone(),
            Orientation::R => p.rotate_180(),
        }
    }
}

/// One output placement: an integer-lattice position plus orientation
/// (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: IntegerVector,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(position: IntegerVector, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Real-plane translation this placement applies to a part already
    /// normalized to the origin.
    pub fn to_point(self, raster_step: i64) -> Point {
        self.position.to_point(raster_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_within_range() {
        assert!(NestingParameters::default().validate().is_ok());
    }

    #[test]
    fn non_positive_table_radius_is_rejected() {
        let mut p = NestingParameters::default();
        p.table_radius = 0.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn orientation_toggle_is_involution() {
        assert_eq!(Orientation::N.toggle().toggle(), Orientation::N);
        assert_eq!(Orientation::R.toggle(), Orientation::N);
    }
}
