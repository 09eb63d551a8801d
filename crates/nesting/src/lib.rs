//! Constrained 2D irregular-shape nesting: placing copies of a single simple
//! polygon part onto a circular table by translation and 180° rotation only
//! (spec.md §1, §2).
//!
//! Two entry points cover the two strategies this crate implements:
//! [`nest`] runs the one-part-at-a-time greedy driver (§4.10); [`nest_tuple`]
//! runs the hybrid pair/quadruple-group driver (§4.11). Both validate their
//! input and configuration up front and return [`NestingError`] for anything
//! spec.md §7 names as a terminal condition — an empty result is not an
//! error, it is `Ok(vec![])`.

pub mod config;
pub mod criterion;
pub mod error;
pub mod geom;
pub mod hull;
pub mod mbb;
pub mod nfp;
pub mod offset;
pub mod raster;
pub mod sec;
pub mod search_space;
pub mod simple_nest;
pub mod tuple_nest;

pub use config::{CriterionKind, NestingParameters, Orientation, Placement};
pub use error::NestingError;
pub use geom::Polygon;
pub use simple_nest::materialize;

use simple_nest::SimpleNestingDriver;

fn validate_part(part: &Polygon) -> Result<(), NestingError> {
    if !part.is_simple() {
        return Err(NestingError::InvalidInput(
            "part polygon must be simple, have at least 3 vertices, and nonzero area".to_string(),
        ));
    }
    Ok(())
}

/// Run the simple (one-part-at-a-time) nesting driver to completion and
/// return the placement list (spec.md §4.10).
pub fn nest(part: &Polygon, config: NestingParameters) -> Result<Vec<Placement>, NestingError> {
    config.validate()?;
    validate_part(part)?;
    let mut driver = SimpleNestingDriver::new(part, config)?;
    Ok(driver.run().to_vec())
}

/// Run the hybrid tuple nesting driver and return the placed polygons,
/// already translated to table coordinates (spec.md §4.11).
pub fn nest_tuple(part: &Polygon, config: NestingParameters) -> Result<Vec<Polygon>, NestingError> {
    config.validate()?;
    validate_part(part)?;
    tuple_nest::tuple_nest(part, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geom::point::Point;

    fn unit_square(side: f64) -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(side, 0.0),
            Point::new(side, side),
            Point::new(0.0, side),
        ])
    }

    #[test]
    fn nest_rejects_degenerate_input() {
        let line = Polygon::from_ccw_unchecked(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        let err = nest(&line, NestingParameters::default()).unwrap_err();
        assert!(matches!(err, NestingError::InvalidInput(_)));
    }

    #[test]
    fn nest_rejects_bad_config() {
        let sq = unit_square(100.0);
        let mut config = NestingParameters::default();
        config.table_radius = -1.0;
        let err = nest(&sq, config).unwrap_err();
        assert!(matches!(err, NestingError::ConfigOutOfRange(_)));
    }

    #[test]
    fn nest_places_multiple_copies_of_a_small_part() {
        let sq = unit_square(100.0);
        let config = NestingParameters {
            table_radius: 250.0,
            part_clearance: 10.0,
            ..NestingParameters::default()
        };
        let placements = nest(&sq, config).unwrap();
        assert!(placements.len() >= 2);
    }

    #[test]
    fn nest_tuple_places_at_least_one_copy() {
        let sq = unit_square(60.0);
        let config = NestingParameters {
            table_radius: 400.0,
            part_clearance: 8.0,
            ..NestingParameters::default()
        };
        let polys = nest_tuple(&sq, config).unwrap();
        assert!(!polys.is_empty());
    }
}
