//! `SearchSpace` — the set of integer-lattice positions still available for
//! the next placement (spec.md §4.8).

use super::geom::ivec::IntegerVector;
use std::collections::BTreeSet;

/// Ordered sets of candidate and excluded lattice offsets. `BTreeSet`
/// iterates in ascending key order, which is exactly the lexicographic
/// `(x, y)` order spec.md §5 requires for deterministic tie-breaking.
#[derive(Clone, Debug, Default)]
pub struct SearchSpace {
    fit_total: BTreeSet<IntegerVector>,
    nofit_total: BTreeSet<IntegerVector>,
}

impl SearchSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fit_total(&self) -> &BTreeSet<IntegerVector> {
        &self.fit_total
    }

    pub fn nofit_total(&self) -> &BTreeSet<IntegerVector> {
        &self.nofit_total
    }

    /// `true` iff `fit_total` and `nofit_total` are disjoint — the
    /// invariant this type must uphold after every call (spec.md §4.8, §8
    /// "SearchSpace disjointness").
    pub fn invariant_holds(&self) -> bool {
        self.fit_total.is_disjoint(&self.nofit_total)
    }

    /// Register one new placement at `pos`: translate `fit`/`nofit` by
    /// `pos`, keep only `fit` survivors passing `filter`, and fold both into
    /// the running totals (spec.md §4.8).
    pub fn add_placement<F>(
        &mut self,
        pos: IntegerVector,
        fit: &[IntegerVector],
        nofit: &[IntegerVector],
        filter: F,
    ) where
        F: Fn(IntegerVector) -> bool,
    {
        for &f in fit {
            let v = pos + f;
            if !filter(v) {
                continue;
            }
            if !self.nofit_total.contains(&v) {
                self.fit_total.insert(v);
            }
        }
        for &nf in nofit {
            let v = pos + nf;
            self.fit_total.remove(&v);
            self.nofit_total.insert(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_and_nofit_stay_disjoint() {
        let mut space = SearchSpace::new();
        let fit = vec![IntegerVector::new(1, 0), IntegerVector::new(0, 1)];
        let nofit = vec![IntegerVector::new(0, 0)];
        space.add_placement(IntegerVector::zero(), &fit, &nofit, |_| true);
        assert!(space.invariant_holds());
        assert_eq!(space.fit_total().len(), 2);
        assert_eq!(space.nofit_total().len(), 1);
    }

    #[test]
    fn later_nofit_overrides_earlier_fit() {
        let mut space = SearchSpace::new();
        space.add_placement(
            IntegerVector::zero(),
            &[IntegerVector::new(5, 5)],
            &[],
            |_| true,
        );
        assert!(space.fit_total().contains(&IntegerVector::new(5, 5)));
        space.add_placement(
            IntegerVector::zero(),
            &[],
            &[IntegerVector::new(5, 5)],
            |_| true,
        );
        assert!(!space.fit_total().contains(&IntegerVector::new(5, 5)));
        assert!(space.nofit_total().contains(&IntegerVector::new(5, 5)));
    }

    #[test]
    fn filter_excludes_off_table_candidates() {
        let mut space = SearchSpace::new();
        let fit = vec![IntegerVector::new(100, 100), IntegerVector::new(1, 1)];
        space.add_placement(IntegerVector::zero(), &fit, &[], |v| v.x < 10);
        assert_eq!(space.fit_total().len(), 1);
        assert!(space.fit_total().contains(&IntegerVector::new(1, 1)));
    }

    #[test]
    fn translation_by_pos_is_applied_before_filtering() {
        let mut space = SearchSpace::new();
        let fit = vec![IntegerVector::new(1, 0)];
        space.add_placement(IntegerVector::new(10, 10), &fit, &[], |_| true);
        assert!(space.fit_total().contains(&IntegerVector::new(11, 10)));
    }
}
