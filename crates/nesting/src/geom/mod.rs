//! Geometry kernel: points, vectors, polygons, segments, lines, rectangles,
//! circles, arcs (spec.md §4.1).
//!
//! Everything above this module builds on these primitives; nothing in here
//! depends on the nesting-specific modules (`hull`, `mbb`, `sec`, `nfp`,
//! `offset`, `raster`, `search_space`, `criterion`, drivers).

pub mod arc;
pub mod circle;
pub mod ivec;
pub mod line;
pub mod point;
pub mod polygon;
pub mod rect;
pub mod segment;

pub use arc::CircularArc;
pub use circle::Circle;
pub use ivec::{reflect as reflect_ivec, IntegerVector};
pub use line::Line;
pub use point::Point;
pub use polygon::Polygon;
pub use rect::{AxisAlignedRectangle, OrientedRectangle};
pub use segment::{segment_intersection, DirectedLineSegment};
