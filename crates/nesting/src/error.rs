//! Public error surface (spec.md §7).
//!
//! Internal geometric primitives keep returning `Option`/`None` as sentinels
//! for expected non-results (parallel lines, empty search sets); only the
//! driver and configuration-validation boundary convert the terminal
//! conditions spec.md §7 names into this enum.

use thiserror::Error;

/// One variant per spec.md §7 error kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NestingError {
    #[error("invalid input polygon: {0}")]
    InvalidInput(String),

    #[error("geometric degeneracy: {0}")]
    GeometricDegeneracy(String),

    /// Documents the §7 taxonomy only. An empty nesting result is
    /// `Ok(vec![])`, not an error — no driver in this crate ever constructs
    /// this variant.
    #[error("no placement was possible")]
    EmptyResult,

    #[error("configuration value out of range: {0}")]
    ConfigOutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message_includes_detail() {
        let e = NestingError::InvalidInput("fewer than 3 vertices".to_string());
        assert!(e.to_string().contains("fewer than 3 vertices"));
    }
}
