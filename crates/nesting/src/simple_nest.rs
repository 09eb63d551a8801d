//! Simple nesting driver: one part at a time (spec.md §4.10, §4.12).

use super::config::{NestingParameters, Orientation, Placement};
use super::criterion::NestingCriterion;
use super::error::NestingError;
use super::geom::ivec::IntegerVector;
use super::geom::point::Point;
use super::geom::polygon::Polygon;
use super::offset::offset_curve;
use super::raster::{build_no_fit_space, Case, NoFitSpace};
use super::search_space::SearchSpace;
use tracing::debug;

/// The three-state machine spec.md §4.12 describes for the simple driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DriverState {
    Empty,
    Running,
    Done,
}

/// One-part-at-a-time placement loop over the normal and rotated search
/// spaces (spec.md §4.10).
pub struct SimpleNestingDriver {
    config: NestingParameters,
    part_n: Polygon,
    part_r: Polygon,
    offset_n: Polygon,
    offset_r: Polygon,
    nofit: NoFitSpace,
    search_n: SearchSpace,
    search_r: SearchSpace,
    criterion: Box<dyn NestingCriterion>,
    placements: Vec<Placement>,
    state: DriverState,
}

fn strictly_on_table(part: &Polygon, table_radius: f64, raster_step: i64) -> impl Fn(IntegerVector) -> bool + '_ {
    move |v: IntegerVector| {
        let d = v.to_point(raster_step);
        // Strict `<`, not `<=` — spec.md §9 calls out that the source's
        // strict boundary exclusion is deliberate and must be preserved.
        part.vertices().iter().all(|&p| (p + d).norm() < table_radius)
    }
}

impl SimpleNestingDriver {
    pub fn new(part: &Polygon, config: NestingParameters) -> Result<Self, NestingError> {
        config.validate()?;
        if !part.is_simple() {
            return Err(NestingError::InvalidInput(
                "part polygon must be simple, have at least 3 vertices, and nonzero area"
                    .to_string(),
            ));
        }

        let part_n = part.normalize();
        let part_r = part_n.rotate_180();

        let offset_tagged = offset_curve(&part_n, config.part_clearance, config.max_normal_error);
        let offset_n = offset_tagged.polygon().clone();
        let offset_r = offset_n.rotate_180();

        let nofit = build_no_fit_space(&offset_n, config.raster_step, config.max_normal_error)?;
        let criterion = config.criterion.build(config.rng_seed);

        Ok(Self {
            config,
            part_n,
            part_r,
            offset_n,
            offset_r,
            nofit,
            search_n: SearchSpace::new(),
            search_r: SearchSpace::new(),
            criterion,
            placements: Vec::new(),
            state: DriverState::Empty,
        })
    }

    /// First placement: a copy at the origin with orientation N, provided it
    /// actually fits on the table — spec.md §7's EMPTY_RESULT case is "the
    /// first placement filters out", so this guard is what can produce it
    /// (spec.md §4.10 step 3).
    fn start(&mut self) {
        let raster_step = self.config.raster_step;
        let zero = IntegerVector::zero();

        if !strictly_on_table(&self.part_n, self.config.table_radius, raster_step)(zero) {
            debug!("simple nesting: first placement does not fit on the table, empty result");
            self.state = DriverState::Done;
            return;
        }

        self.placements.push(Placement::new(zero, Orientation::N));

        let filter_n = strictly_on_table(&self.part_n, self.config.table_radius, raster_step);
        self.search_n
            .add_placement(zero, self.nofit.fit(Case::NN), self.nofit.nofit(Case::NN), filter_n);
        let filter_r = strictly_on_table(&self.part_r, self.config.table_radius, raster_step);
        self.search_r
            .add_placement(zero, self.nofit.fit(Case::NR), self.nofit.nofit(Case::NR), filter_r);

        self.criterion.add_polygon(Point::zero(), &self.offset_n);
        self.state = DriverState::Running;
        debug!("simple nesting: placed first copy at origin");
    }

    /// One iteration of the loop in spec.md §4.10 step 4. Returns `true` if a
    /// placement was applied, `false` if the driver is now `Done`.
    fn step(&mut self) -> bool {
        let raster_step = self.config.raster_step;
        let r_n = self
            .criterion
            .evaluate(self.search_n.fit_total(), raster_step, &self.offset_n);
        let r_r = self
            .criterion
            .evaluate(self.search_r.fit_total(), raster_step, &self.offset_r);

        let chosen = match (r_n, r_r) {
            (None, None) => None,
            (Some((pos, score)), None) => Some((Orientation::N, pos, score)),
            (None, Some((pos, score))) => Some((Orientation::R, pos, score)),
            (Some((pos_n, score_n)), Some((pos_r, score_r))) => {
                // Normal wins ties (spec.md §4.10 step 4d).
                if score_n <= score_r {
                    Some((Orientation::N, pos_n, score_n))
                } else {
                    Some((Orientation::R, pos_r, score_r))
                }
            }
        };

        let (orientation, pos, _score) = match chosen {
            Some(x) => x,
            None => {
                self.state = DriverState::Done;
                return false;
            }
        };

        self.placements.push(Placement::new(pos, orientation));
        let (case_for_n, case_for_r, offset_for_criterion) = match orientation {
            Orientation::N => (Case::NN, Case::NR, &self.offset_n),
            Orientation::R => (Case::RN, Case::RR, &self.offset_r),
        };
        let filter_n = strictly_on_table(&self.part_n, self.config.table_radius, raster_step);
        self.search_n.add_placement(
            pos,
            self.nofit.fit(case_for_n),
            self.nofit.nofit(case_for_n),
            filter_n,
        );
        let filter_r = strictly_on_table(&self.part_r, self.config.table_radius, raster_step);
        self.search_r.add_placement(
            pos,
            self.nofit.fit(case_for_r),
            self.nofit.nofit(case_for_r),
            filter_r,
        );
        self.criterion
            .add_polygon(pos.to_point(raster_step), offset_for_criterion);
        debug!(?orientation, ?pos, "simple nesting: placed copy");
        true
    }

    /// Run to completion and return the accumulated placement list.
    pub fn run(&mut self) -> &[Placement] {
        if self.state == DriverState::Empty {
            self.start();
        }
        while self.state == DriverState::Running {
            if !self.step() {
                break;
            }
        }
        &self.placements
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

/// Apply a placement list to the original (un-normalized) input polygon,
/// producing the placed polygons in table coordinates.
pub fn materialize(part: &Polygon, placements: &[Placement], raster_step: i64) -> Vec<Polygon> {
    let part_n = part.normalize();
    placements
        .iter()
        .map(|p| p.orientation.apply(&part_n).translate(p.to_point(raster_step)))
        .collect()
}
