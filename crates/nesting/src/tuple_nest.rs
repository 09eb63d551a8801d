//! Tuple (hybrid group) nesting driver (spec.md §4.11).
//!
//! The source keys every intermediate compound space and polygon set by a
//! string such as `"NN_NN"` in a dictionary. This crate replaces that with
//! two small recursive combinators, [`group_vs_orientation_space`] and
//! [`group_vs_group_space`], that compute any compound space on demand from
//! the four base single-vs-single spaces — the same `addSubtract` algebra
//! spec.md §4.11 step 4 defines, folded once per extra member instead of
//! materialized ahead of time under a name. Only the three nesting types
//! spec.md step 6-9 actually carries to the final arrangement search —
//! `NN_NN`, `NR_NR`, `NN_RR` — are evaluated; see `SPEC_FULL.md` §13 OQ2 for
//! the declared enumeration order used to break ties between them.

use super::config::{CriterionKind, NestingParameters, Orientation};
use super::error::NestingError;
use super::geom::ivec::IntegerVector;
use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::hull::convex_hull;
use super::offset::offset_curve;
use super::raster::{build_no_fit_space, Case, NoFitSpace};
use super::search_space::SearchSpace;
use super::sec::smallest_enclosing_circle;
use std::collections::BTreeSet;
use tracing::debug;

/// Paired fit/no-fit integer-lattice offsets between two (possibly compound)
/// polygon groups — the generalization of [`super::raster::NoFitSpace`]'s
/// single case to arbitrarily composed groups.
#[derive(Clone, Debug)]
pub struct Space {
    pub fit: Vec<IntegerVector>,
    pub nofit: Vec<IntegerVector>,
}

impl Space {
    fn from_case(nfs: &NoFitSpace, case: Case) -> Self {
        Self {
            fit: nfs.fit(case).to_vec(),
            nofit: nfs.nofit(case).to_vec(),
        }
    }

    /// Point-reflect every offset about the origin.
    pub fn reflect(&self) -> Self {
        Self {
            fit: self.fit.iter().copied().map(super::geom::ivec::reflect).collect(),
            nofit: self
                .nofit
                .iter()
                .copied()
                .map(super::geom::ivec::reflect)
                .collect(),
        }
    }

    /// `addSubtract`: compose `self` (an anchor member's space, itself
    /// sitting at the origin) with `other` (a second anchor member's space,
    /// sitting at offset `d`) into the compound space for the whole group
    /// (spec.md §4.11 step 4) — the same totals-merge algebra as
    /// [`super::search_space::SearchSpace::add_placement`], lifted from
    /// "placements vs running totals" to "space vs space".
    pub fn add_subtract(&self, other: &Space, d: IntegerVector) -> Space {
        let mut fit_total: BTreeSet<IntegerVector> = self.fit.iter().copied().collect();
        let mut nofit_total: BTreeSet<IntegerVector> = self.nofit.iter().copied().collect();
        for &f in &other.fit {
            let v = f + d;
            if !nofit_total.contains(&v) {
                fit_total.insert(v);
            }
        }
        for &nf in &other.nofit {
            let v = nf + d;
            fit_total.remove(&v);
            nofit_total.insert(v);
        }
        Space {
            fit: fit_total.into_iter().collect(),
            nofit: nofit_total.into_iter().collect(),
        }
    }
}

/// One member of a composed polygon group: its orientation and offset
/// relative to the group's own local origin. By construction the first
/// member of every group built in this module sits at `Point::zero()`.
#[derive(Clone, Copy, Debug)]
struct Member {
    orientation: Orientation,
    offset: Point,
}

#[derive(Clone, Debug)]
struct PolygonGroup {
    members: Vec<Member>,
}

impl PolygonGroup {
    fn single(orientation: Orientation) -> Self {
        Self {
            members: vec![Member {
                orientation,
                offset: Point::zero(),
            }],
        }
    }

    fn polygons(&self, base_n: &Polygon, base_r: &Polygon) -> Vec<Polygon> {
        self.members
            .iter()
            .map(|m| {
                let base = match m.orientation {
                    Orientation::N => base_n,
                    Orientation::R => base_r,
                };
                base.translate(m.offset)
            })
            .collect()
    }

    fn vertices(&self, base_n: &Polygon, base_r: &Polygon) -> Vec<Point> {
        self.polygons(base_n, base_r)
            .iter()
            .flat_map(|p| p.vertices().to_vec())
            .collect()
    }

    fn translated(&self, d: Point) -> PolygonGroup {
        PolygonGroup {
            members: self
                .members
                .iter()
                .map(|m| Member {
                    orientation: m.orientation,
                    offset: m.offset + d,
                })
                .collect(),
        }
    }
}

/// The four base single-vs-single spaces this module composes everything
/// else from.
struct SingleOrientationSpaces {
    n_n: Space,
    n_r: Space,
    r_n: Space,
    r_r: Space,
    raster_step: i64,
}

impl SingleOrientationSpaces {
    fn get(&self, anchor: Orientation, probe: Orientation) -> &Space {
        match (anchor, probe) {
            (Orientation::N, Orientation::N) => &self.n_n,
            (Orientation::N, Orientation::R) => &self.n_r,
            (Orientation::R, Orientation::N) => &self.r_n,
            (Orientation::R, Orientation::R) => &self.r_r,
        }
    }
}

/// Compound space for `anchor` (possibly several members) against a single
/// probe orientation: fold the per-member single-vs-`probe_orientation`
/// space, translated by that member's offset, via `addSubtract` (spec.md
/// §4.11 step 4, generalized from exactly two anchor members to any number).
fn group_vs_orientation_space(
    anchor: &PolygonGroup,
    probe_orientation: Orientation,
    single: &SingleOrientationSpaces,
) -> Space {
    let mut result: Option<Space> = None;
    for m in &anchor.members {
        let component = single.get(m.orientation, probe_orientation);
        let d = IntegerVector::from_point_rounded(m.offset, single.raster_step);
        result = Some(match result {
            None => component.clone(),
            Some(acc) => acc.add_subtract(component, d),
        });
    }
    result.expect("group must have at least one member")
}

/// Compound space for `anchor` against a (possibly compound) `probe` group:
/// fold `group_vs_orientation_space(anchor, member.orientation)` for each
/// probe member, translated by that member's own offset (spec.md §4.11 step
/// 5's "2:2 spaces" composition, generalized the same way).
fn group_vs_group_space(anchor: &PolygonGroup, probe: &PolygonGroup, single: &SingleOrientationSpaces) -> Space {
    let mut result: Option<Space> = None;
    for pm in &probe.members {
        let component = group_vs_orientation_space(anchor, pm.orientation, single);
        let d = IntegerVector::from_point_rounded(pm.offset, single.raster_step);
        result = Some(match result {
            None => component,
            Some(acc) => acc.add_subtract(&component, d),
        });
    }
    result.expect("probe group must have at least one member")
}

fn area_score(points: &[Point], kind: CriterionKind, seed: u64) -> f64 {
    match kind {
        CriterionKind::ConvexHullArea => convex_hull(points).map(|h| h.area()).unwrap_or(0.0),
        CriterionKind::SecArea => smallest_enclosing_circle(points, seed).area(),
    }
}

/// Best relative offset in `candidates` for placing `probe_group` (currently
/// anchored at its own local origin) next to `anchor_vertices`, scored by
/// `kind` — the same area-minimization rule as
/// [`super::criterion::NestingCriterion`] (spec.md §4.9), generalized here
/// from a single probe polygon to an arbitrary probe group (spec.md §4.11
/// "pair positions" / "quadruple positions"). Ties broken by ascending
/// lexicographic order of `candidates`, matching spec.md §5.
fn best_offset(
    anchor_vertices: &[Point],
    probe_group: &PolygonGroup,
    base_n: &Polygon,
    base_r: &Polygon,
    candidates: &[IntegerVector],
    raster_step: i64,
    kind: CriterionKind,
    seed: u64,
) -> Option<(IntegerVector, f64)> {
    let mut sorted = candidates.to_vec();
    sorted.sort();
    let probe_vertices = probe_group.vertices(base_n, base_r);
    let mut best: Option<(IntegerVector, f64)> = None;
    for v in sorted {
        let d = v.to_point(raster_step);
        let mut pts = anchor_vertices.to_vec();
        pts.extend(probe_vertices.iter().map(|&p| p + d));
        let score = area_score(&pts, kind, seed);
        if best.as_ref().map(|(_, b)| score < *b).unwrap_or(true) {
            best = Some((v, score));
        }
    }
    best
}

/// The three quadruple nesting types spec.md §4.11 carries through to the
/// final arrangement search, in the enumeration order SPEC_FULL.md §13 OQ2
/// uses to break ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuadrupleKind {
    NnNn,
    NrNr,
    NnRr,
}

struct Arrangement {
    polygons: Vec<Polygon>,
    count: usize,
    radius: f64,
}

/// Hybrid nesting strategy: fixes 2-part and 4-part group shapes first, then
/// lays those groups out on the table (spec.md §4.11, GLOSSARY "Tuple
/// nesting").
pub struct TupleNestingDriver {
    config: NestingParameters,
}

impl TupleNestingDriver {
    pub fn new(config: NestingParameters) -> Self {
        Self { config }
    }

    pub fn run(&self, part: &Polygon) -> Result<Vec<Polygon>, NestingError> {
        self.config.validate()?;
        if !part.is_simple() {
            return Err(NestingError::InvalidInput(
                "part polygon must be simple, have at least 3 vertices, and nonzero area"
                    .to_string(),
            ));
        }

        let raster_step = self.config.raster_step;
        let seed = self.config.rng_seed;
        let crit_kind = self.config.criterion;

        let part_n = part.normalize();
        let part_r = part_n.rotate_180();
        let offset_tagged = offset_curve(&part_n, self.config.part_clearance, self.config.max_normal_error);
        let offset_n = offset_tagged.polygon().clone();
        let offset_r = offset_n.rotate_180();

        let nfs = build_no_fit_space(&offset_n, raster_step, self.config.max_normal_error)?;
        let single = SingleOrientationSpaces {
            n_n: Space::from_case(&nfs, Case::NN),
            n_r: Space::from_case(&nfs, Case::NR),
            r_n: Space::from_case(&nfs, Case::RN),
            r_r: Space::from_case(&nfs, Case::RR),
            raster_step,
        };

        // Phase 3: pair positions.
        let anchor_n = PolygonGroup::single(Orientation::N);
        let probe_n_group = PolygonGroup::single(Orientation::N);
        let probe_r_group = PolygonGroup::single(Orientation::R);

        let space_n_n = group_vs_orientation_space(&anchor_n, Orientation::N, &single);
        let space_n_r = group_vs_orientation_space(&anchor_n, Orientation::R, &single);
        let anchor_n_vertices = anchor_n.vertices(&offset_n, &offset_r);

        let best_nn = best_offset(
            &anchor_n_vertices,
            &probe_n_group,
            &offset_n,
            &offset_r,
            &space_n_n.fit,
            raster_step,
            crit_kind,
            seed,
        );
        let best_nr = best_offset(
            &anchor_n_vertices,
            &probe_r_group,
            &offset_n,
            &offset_r,
            &space_n_r.fit,
            raster_step,
            crit_kind,
            seed,
        );

        let (pos_n_n, pos_n_r) = match (best_nn, best_nr) {
            (Some((a, _)), Some((b, _))) => (a, b),
            _ => {
                debug!("tuple nesting: no pair position found, falling back to a single placed part");
                return Ok(vec![part_n]);
            }
        };

        let pos_n_n_pt = pos_n_n.to_point(raster_step);
        let pos_n_r_pt = pos_n_r.to_point(raster_step);
        let pos_r_r_pt = Point::zero() - pos_n_n_pt;

        let pair_n_n = PolygonGroup {
            members: vec![
                Member {
                    orientation: Orientation::N,
                    offset: Point::zero(),
                },
                Member {
                    orientation: Orientation::N,
                    offset: pos_n_n_pt,
                },
            ],
        };
        let pair_n_r = PolygonGroup {
            members: vec![
                Member {
                    orientation: Orientation::N,
                    offset: Point::zero(),
                },
                Member {
                    orientation: Orientation::R,
                    offset: pos_n_r_pt,
                },
            ],
        };
        let pair_r_r = PolygonGroup {
            members: vec![
                Member {
                    orientation: Orientation::R,
                    offset: Point::zero(),
                },
                Member {
                    orientation: Orientation::R,
                    offset: pos_r_r_pt,
                },
            ],
        };

        let mut best: Option<(QuadrupleKind, Arrangement)> = None;
        for kv in [QuadrupleKind::NnNn, QuadrupleKind::NrNr, QuadrupleKind::NnRr] {
            if let Some(arr) = self.nest_quadruple(
                kv, &pair_n_n, &pair_n_r, &pair_r_r, &single, &offset_n, &offset_r, &part_n, &part_r, raster_step,
                crit_kind, seed,
            ) {
                let better = match &best {
                    None => true,
                    Some((_, b)) => arr.count > b.count || (arr.count == b.count && arr.radius < b.radius),
                };
                if better {
                    debug!(?kv, count = arr.count, radius = arr.radius, "tuple nesting: new best arrangement");
                    best = Some((kv, arr));
                }
            }
        }

        match best {
            Some((_, arrangement)) => Ok(arrangement.polygons),
            None => Ok(vec![part_n]),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn nest_quadruple(
        &self,
        kind_variant: QuadrupleKind,
        pair_n_n: &PolygonGroup,
        pair_n_r: &PolygonGroup,
        pair_r_r: &PolygonGroup,
        single: &SingleOrientationSpaces,
        offset_n: &Polygon,
        offset_r: &Polygon,
        part_n: &Polygon,
        part_r: &Polygon,
        raster_step: i64,
        crit_kind: CriterionKind,
        seed: u64,
    ) -> Option<Arrangement> {
        let (anchor_pair, probe_shape) = match kind_variant {
            QuadrupleKind::NnNn => (pair_n_n, pair_n_n),
            QuadrupleKind::NrNr => (pair_n_r, pair_n_r),
            QuadrupleKind::NnRr => (pair_n_n, pair_r_r),
        };

        // Phase 5/6: the 2:2 space and the best quadruple position.
        let pair_space = group_vs_group_space(anchor_pair, probe_shape, single);
        let anchor_vertices = anchor_pair.vertices(offset_n, offset_r);
        let (pos, _) = best_offset(
            &anchor_vertices,
            probe_shape,
            offset_n,
            offset_r,
            &pair_space.fit,
            raster_step,
            crit_kind,
            seed,
        )?;
        let pos_pt = pos.to_point(raster_step);

        let mut members = anchor_pair.members.clone();
        for m in &probe_shape.members {
            members.push(Member {
                orientation: m.orientation,
                offset: m.offset + pos_pt,
            });
        }
        let quadruple = PolygonGroup { members };

        // Phase 7: the 4:4 space for repeating this quadruple shape.
        let self_space = group_vs_group_space(&quadruple, &quadruple, single);

        let quad_vertices0 = quadruple.vertices(offset_n, offset_r);
        let hull0 = convex_hull(&quad_vertices0)?;
        let sec0 = smallest_enclosing_circle(hull0.vertices(), seed);
        let init_shift = Point::zero() - sec0.center;
        let quadruple0 = quadruple.translated(init_shift);

        let table_radius = self.config.table_radius;
        let accept_radius = table_radius + sec0.radius;
        let accept = move |v: IntegerVector| v.to_point(raster_step).norm() <= accept_radius;

        // Phase 8: greedy placement of repeated quadruple copies.
        let mut search = SearchSpace::new();
        search.add_placement(IntegerVector::zero(), &self_space.fit, &self_space.nofit, accept);

        let mut copies: Vec<PolygonGroup> = vec![quadruple0.clone()];
        let mut accumulated: Vec<Point> = quadruple0.vertices(offset_n, offset_r);

        loop {
            let candidates: Vec<IntegerVector> = search.fit_total().iter().copied().collect();
            if candidates.is_empty() {
                break;
            }
            let found = best_offset(
                &accumulated,
                &quadruple0,
                offset_n,
                offset_r,
                &candidates,
                raster_step,
                crit_kind,
                seed,
            );
            let (next_pos, _) = match found {
                Some(x) => x,
                None => break,
            };
            let pt = next_pos.to_point(raster_step);
            let placed = quadruple0.translated(pt);
            accumulated.extend(placed.vertices(offset_n, offset_r));
            copies.push(placed);
            search.add_placement(next_pos, &self_space.fit, &self_space.nofit, accept);
        }

        // Phase 9: grid search for the table-centering offset.
        let all_vertices: Vec<Point> = copies.iter().flat_map(|g| g.vertices(part_n, part_r)).collect();
        let hull_all = convex_hull(&all_vertices)?;
        let sec_all = smallest_enclosing_circle(hull_all.vertices(), seed);
        let half_side = sec_all.radius / std::f64::consts::SQRT_2;
        let steps = ((half_side / raster_step as f64).ceil() as i64).max(0);

        let mut best_center: Option<(Point, usize, f64)> = None;
        for i in -steps..=steps {
            for j in -steps..=steps {
                let offset = Point::new((i * raster_step) as f64, (j * raster_step) as f64);
                if offset.x.abs() > half_side + 1e-9 || offset.y.abs() > half_side + 1e-9 {
                    continue;
                }
                let c = sec_all.center + offset;
                let mut count = 0usize;
                let mut max_dist = 0.0_f64;
                for group in &copies {
                    for poly in group.polygons(part_n, part_r) {
                        if poly.vertices().iter().all(|&v| v.distance(c) < table_radius) {
                            count += 1;
                            for &v in poly.vertices() {
                                max_dist = max_dist.max(v.distance(c));
                            }
                        }
                    }
                }
                let better = match &best_center {
                    None => true,
                    Some((_, bc, br)) => count > *bc || (count == *bc && max_dist < *br),
                };
                if better {
                    best_center = Some((c, count, max_dist));
                }
            }
        }

        let (c, count, radius) = best_center?;
        if count == 0 {
            return None;
        }
        let polygons: Vec<Polygon> = copies
            .iter()
            .flat_map(|g| g.polygons(part_n, part_r))
            .filter(|poly| poly.vertices().iter().all(|&v| v.distance(c) < table_radius))
            .map(|poly| poly.translate(Point::zero() - c))
            .collect();

        Some(Arrangement { polygons, count, radius })
    }
}

/// Entry point matching spec.md §4.11's contract.
pub fn tuple_nest(part: &Polygon, config: NestingParameters) -> Result<Vec<Polygon>, NestingError> {
    TupleNestingDriver::new(config).run(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point::Point;

    fn unit_square(side: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
    }

    #[test]
    fn space_reflect_is_involution() {
        let nfs = build_no_fit_space(&unit_square(1.0), 1, 0.05).unwrap();
        let s = Space::from_case(&nfs, Case::NN);
        let twice = s.reflect().reflect();
        let mut a: Vec<_> = s.fit.clone();
        let mut b: Vec<_> = twice.fit.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn tuple_nesting_places_at_least_one_square() {
        let sq = unit_square(100.0);
        let config = NestingParameters {
            table_radius: 250.0,
            part_clearance: 10.0,
            ..NestingParameters::default()
        };
        let result = tuple_nest(&sq, config).unwrap();
        assert!(!result.is_empty());
    }

    #[test]
    fn tuple_nesting_result_has_no_overlaps() {
        let sq = unit_square(60.0);
        let config = NestingParameters {
            table_radius: 400.0,
            part_clearance: 8.0,
            ..NestingParameters::default()
        };
        let result = tuple_nest(&sq, config).unwrap();
        for i in 0..result.len() {
            for j in (i + 1)..result.len() {
                assert!(!result[i].intersects(&result[j]));
            }
        }
    }

    #[test]
    fn tuple_nesting_is_deterministic() {
        let sq = unit_square(60.0);
        let config = NestingParameters {
            table_radius: 400.0,
            part_clearance: 8.0,
            rng_seed: 7,
            ..NestingParameters::default()
        };
        let r1 = tuple_nest(&sq, config).unwrap();
        let r2 = tuple_nest(&sq, config).unwrap();
        assert_eq!(r1.len(), r2.len());
    }
}
