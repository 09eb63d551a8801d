//! Fit/no-fit raster construction — `NoFitSpace` (spec.md §4.7).
//!
//! For an offset polygon `Q` already at clearance `r`, builds four
//! `(FitPoints, NoFitPoints)` pairs of integer-lattice offsets, one per
//! orientation-pair case. `NN` and `NR` are computed directly from the
//! no-fit polygon of the relevant convex hulls; `RR`/`RN` are obtained by
//! point-reflecting `NN`/`NR` (spec.md §8 "Raster symmetry").

use super::error::NestingError;
use super::geom::ivec::{reflect, IntegerVector};
use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::hull::convex_hull;
use super::nfp::no_fit_polygon;
use super::offset::offset_curve;
use tracing::trace;

/// The four orientation-pair cases a raster covers: `fixed`_`orbiting`,
/// `N` = normal, `R` = rotated 180°.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Case {
    NN,
    RR,
    NR,
    RN,
}

impl Case {
    fn index(self) -> usize {
        match self {
            Case::NN => 0,
            Case::RR => 1,
            Case::NR => 2,
            Case::RN => 3,
        }
    }
}

/// Four pairs of fit/no-fit integer-lattice offsets, one pair per
/// orientation case (spec.md §3 `FitPoints[c]`, `NoFitPoints[c]`).
#[derive(Clone, Debug)]
pub struct NoFitSpace {
    fit: [Vec<IntegerVector>; 4],
    nofit: [Vec<IntegerVector>; 4],
}

impl NoFitSpace {
    pub fn fit(&self, case: Case) -> &[IntegerVector] {
        &self.fit[case.index()]
    }

    pub fn nofit(&self, case: Case) -> &[IntegerVector] {
        &self.nofit[case.index()]
    }
}

fn raster_candidates(bbox_half_w: i64, bbox_half_h: i64) -> Vec<IntegerVector> {
    let mut out = Vec::with_capacity(((2 * bbox_half_w + 1) * (2 * bbox_half_h + 1)) as usize);
    for i in -bbox_half_w..=bbox_half_w {
        for j in -bbox_half_h..=bbox_half_h {
            out.push(IntegerVector::new(i, j));
        }
    }
    out
}

/// Build the `(fit, nofit)` pair for one independently-computed case —
/// spec.md §4.7 steps 1-5, run for either `NN` or `NR`.
fn build_case(
    fixed_hull: &Polygon,
    orbiting_hull: &Polygon,
    fixed_full: &Polygon,
    orbiting_full: &Polygon,
    raster_step: i64,
    max_normal_error: f64,
) -> (Vec<IntegerVector>, Vec<IntegerVector>) {
    let nfp = no_fit_polygon(fixed_hull, orbiting_hull);
    let expanded = offset_curve(&nfp.polygon, std::f64::consts::SQRT_2 * raster_step as f64, max_normal_error);
    let nfp_plus = expanded.polygon();

    let bbox = fixed_full.bounding_box();
    let half_w = ((bbox.width / raster_step as f64).ceil() as i64 + 1).max(1);
    let half_h = ((bbox.height / raster_step as f64).ceil() as i64 + 1).max(1);

    let ref_fixed = fixed_full.reference_point();
    let ref_orbiting = orbiting_full.reference_point();
    let correction = ref_orbiting - nfp.ref_orbiting;

    let mut fit = Vec::new();
    let mut nofit = Vec::new();
    for v in raster_candidates(half_w, half_h) {
        let test_point: Point = ref_fixed + v.to_point(raster_step) + correction;
        if !nfp_plus.contains_eps(test_point, 1e-6) {
            // Outside the safe upper bound: guaranteed non-overlapping.
            fit.push(v);
            continue;
        }
        let translated_orbiting = orbiting_full.translate(v.to_point(raster_step));
        if fixed_full.intersects(&translated_orbiting) {
            nofit.push(v);
        } else {
            fit.push(v);
        }
    }
    trace!(fit = fit.len(), nofit = nofit.len(), "raster case built");
    (fit, nofit)
}

/// Build all four cases for offset polygon `q` (already at clearance `r`).
/// `GEOMETRIC_DEGENERACY` (spec.md §7) if `q` or its rotation fails to yield
/// a convex hull (fewer than 3 distinct vertices survive deduplication).
pub fn build_no_fit_space(
    q: &Polygon,
    raster_step: i64,
    max_normal_error: f64,
) -> Result<NoFitSpace, NestingError> {
    let q_n = q.clone();
    let q_r = q.rotate_180();
    let c_n = convex_hull(q_n.vertices()).ok_or_else(|| {
        NestingError::GeometricDegeneracy("offset polygon has no well-defined convex hull".to_string())
    })?;
    let c_r = convex_hull(q_r.vertices()).ok_or_else(|| {
        NestingError::GeometricDegeneracy("rotated offset polygon has no well-defined convex hull".to_string())
    })?;

    let (fit_nn, nofit_nn) = build_case(&c_n, &c_n, &q_n, &q_n, raster_step, max_normal_error);
    let (fit_nr, nofit_nr) = build_case(&c_n, &c_r, &q_n, &q_r, raster_step, max_normal_error);

    let fit_rr: Vec<IntegerVector> = fit_nn.iter().copied().map(reflect).collect();
    let nofit_rr: Vec<IntegerVector> = nofit_nn.iter().copied().map(reflect).collect();
    let fit_rn: Vec<IntegerVector> = fit_nr.iter().copied().map(reflect).collect();
    let nofit_rn: Vec<IntegerVector> = nofit_nr.iter().copied().map(reflect).collect();

    Ok(NoFitSpace {
        fit: [fit_nn, fit_rr, fit_nr, fit_rn],
        nofit: [nofit_nn, nofit_rr, nofit_nr, nofit_rn],
    })
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
    fn fit_and_nofit_are_disjoint() {
        let sq = unit_square();
        let space = build_no_fit_space(&sq, 1, 0.05).unwrap();
        for case in [Case::NN, Case::RR, Case::NR, Case::RN] {
            let fit: std::collections::HashSet<_> = space.fit(case).iter().copied().collect();
            for v in space.nofit(case) {
                assert!(!fit.contains(v));
            }
        }
    }

    #[test]
    fn raster_symmetry_rr_is_reflection_of_nn() {
        let sq = unit_square();
        let space = build_no_fit_space(&sq, 1, 0.05).unwrap();
        let mut fit_nn: Vec<_> = space.fit(Case::NN).iter().copied().map(reflect).collect();
        let mut fit_rr: Vec<_> = space.fit(Case::RR).to_vec();
        fit_nn.sort();
        fit_rr.sort();
        assert_eq!(fit_nn, fit_rr);
    }

    #[test]
    fn zero_offset_is_never_a_fit_point() {
        // Placing a second copy directly on top of the first must always
        // overlap.
        let sq = unit_square();
        let space = build_no_fit_space(&sq, 1, 0.05).unwrap();
        assert!(space.nofit(Case::NN).contains(&IntegerVector::zero()));
    }

    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        /// Raster symmetry (spec.md §8): `RR`/`RN` are always the point
        /// reflection of `NN`/`NR`, for any convex offset polygon.
        #[test]
        fn prop_raster_symmetry_holds(
            w in 1.0f64..10.0, h in 1.0f64..10.0, step in 1i64..4
        ) {
            let rect = Polygon::new(vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ]);
            let space = build_no_fit_space(&rect, step, 0.05).unwrap();
            let mut fit_nn: Vec<_> = space.fit(Case::NN).iter().copied().map(reflect).collect();
            let mut fit_rr: Vec<_> = space.fit(Case::RR).to_vec();
            fit_nn.sort();
            fit_rr.sort();
            prop_assert_eq!(fit_nn, fit_rr);
        }
    }
}
