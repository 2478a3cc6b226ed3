#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The detection pass: candidate selection, optional reordering and
//! verification, producing the list of confirmed symmetries.
//!
//! Every candidate moves through `selected -> matching -> confirmed |
//! rejected` exactly once. Results are reported in discovery order, which is
//! the variable order (input order, or signature order with sorting enabled).
//!
//! In pair mode with grouping, a confirmed partner is moved directly behind
//! the current anchor and becomes the anchor for the rest of the scan, so a
//! group `[v1, v2, v3]` states that `(v1, v2)` and `(v2, v3)` were each
//! verified. Nothing is claimed about `(v1, v3)`.

use crate::symmetry::candidates::{is_pair_candidate, single_candidates};
use crate::symmetry::cnf::Cnf;
use crate::symmetry::config::{DetectorConfig, Mode};
use crate::symmetry::literal::{Literal, Variable};
use crate::symmetry::occurrence::OccurrenceIndex;
use crate::symmetry::ordering::{sort_clauses_by_size, sort_literals, sort_variables};
use crate::symmetry::substitution::Substitution;
use crate::symmetry::verifier::Verifier;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// A confirmed symmetry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// `v` and `-v` can be exchanged.
    Negation(Variable),
    /// `v1` and `v2` can be exchanged.
    Pair(Variable, Variable),
    /// Every consecutive pair of the chain can be exchanged.
    Group(Vec<Variable>),
}

impl Symmetry {
    /// The substitutions this symmetry asserts, one per verified exchange.
    #[must_use]
    pub fn substitutions(&self) -> Vec<Substitution> {
        match self {
            Self::Negation(var) => vec![Substitution::Negate(*var)],
            Self::Pair(v1, v2) => vec![Substitution::Swap(*v1, *v2)],
            Self::Group(vars) => vars
                .iter()
                .tuple_windows()
                .map(|(&v1, &v2)| Substitution::Swap(v1, v2))
                .collect(),
        }
    }
}

impl Display for Symmetry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negation(var) => write!(f, "-{var} {var} 0"),
            Self::Pair(v1, v2) => write!(f, "-{v1} {v2} 0"),
            Self::Group(vars) => {
                write!(f, "found symmetry group: ")?;
                for var in vars {
                    write!(f, "{var} ")?;
                }
                Ok(())
            }
        }
    }
}

/// Counters describing the work done by one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Variables (single mode) or pairs (pair mode) that passed the count check.
    pub candidates: usize,
    /// Variable pairs examined in pair mode.
    pub pairs_checked: u64,
    /// Clause pairs handed to the matcher.
    pub clause_comparisons: u64,
    /// Clauses whose literals were put in magnitude order.
    pub sorted_clauses: usize,
    /// Whether the pair scan stopped at the limit. The result is then a
    /// subset of the symmetries.
    pub limit_reached: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymmetryReport {
    pub symmetries: Vec<Symmetry>,
    pub stats: SearchStats,
}

/// Owns the formula and its occurrence index for the duration of a search.
#[derive(Debug, Clone)]
pub struct SymmetryDetector {
    cnf: Cnf,
    index: OccurrenceIndex,
    config: DetectorConfig,
}

impl SymmetryDetector {
    /// Builds the occurrence index of `cnf`.
    #[must_use]
    pub fn new(cnf: Cnf, config: DetectorConfig) -> Self {
        let index = OccurrenceIndex::new(&cnf);
        Self { cnf, index, config }
    }

    #[must_use]
    pub const fn cnf(&self) -> &Cnf {
        &self.cnf
    }

    #[must_use]
    pub const fn index(&self) -> &OccurrenceIndex {
        &self.index
    }

    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Runs the search selected by the configured mode. Running again yields
    /// the same report.
    pub fn run(&mut self) -> SymmetryReport {
        match self.config.mode {
            Mode::Single => self.find_negations(),
            Mode::Pair => self.find_pairs(),
        }
    }

    fn variable_order(&self) -> Vec<Variable> {
        let mut vars: Vec<Variable> = self.cnf.variables().collect();
        if self.config.variable_sorting {
            sort_variables(&self.index, &mut vars);
        }
        vars
    }

    /// Applies the clause and literal orderings to the lists of `vars`.
    fn prepare(&mut self, vars: &[Variable], stats: &mut SearchStats) {
        if self.config.sort_clauses {
            sort_clauses_by_size(&self.cnf, &mut self.index, vars);
        }
        if self.config.sort_literals {
            stats.sorted_clauses = sort_literals(&mut self.cnf, &self.index, vars);
        }
    }

    fn find_negations(&mut self) -> SymmetryReport {
        let order = self.variable_order();
        let candidates = single_candidates(&self.index, &order);
        let mut stats = SearchStats {
            candidates: candidates.len(),
            ..SearchStats::default()
        };
        debug!(candidates = candidates.len(), "selected negation candidates");

        self.prepare(&candidates, &mut stats);

        let mut verifier = Verifier::new(
            &self.cnf,
            &self.index,
            self.config.matching_strategy(),
            self.config.sort_literals,
        );

        let mut symmetries = Vec::new();
        for &var in &candidates {
            if verifier.verify_negation(var) {
                debug!(var, "confirmed negation symmetry");
                symmetries.push(Symmetry::Negation(var));
            } else {
                debug!(var, "rejected negation candidate");
            }
        }

        stats.clause_comparisons = verifier.comparisons();
        SymmetryReport { symmetries, stats }
    }

    fn find_pairs(&mut self) -> SymmetryReport {
        let mut order = self.variable_order();
        let mut stats = SearchStats::default();

        let active: Vec<Variable> = order
            .iter()
            .copied()
            .filter(|&var| self.index.count(Literal::positive(var)) != 0)
            .collect();
        self.prepare(&active, &mut stats);

        let config = self.config;
        let index = &self.index;
        let mut verifier = Verifier::new(
            &self.cnf,
            index,
            config.matching_strategy(),
            config.sort_literals,
        );

        let mut symmetries = Vec::new();
        let mut i = 0;

        while i < order.len() {
            let mut anchor = order[i];
            let mut group = vec![anchor];
            let mut j = i + 1;

            while j < order.len() {
                if stats.pairs_checked >= config.pair_limit {
                    stats.limit_reached = true;
                    break;
                }
                stats.pairs_checked += 1;

                let var = order[j];
                if is_pair_candidate(index, anchor, var) {
                    stats.candidates += 1;
                    if verifier.verify_pair(anchor, var) {
                        debug!(v1 = anchor, v2 = var, "confirmed pair symmetry");
                        if config.groups {
                            group.push(var);
                            order.swap(i + 1, j);
                            i += 1;
                            anchor = var;
                        } else {
                            symmetries.push(Symmetry::Pair(anchor, var));
                        }
                    } else {
                        debug!(v1 = anchor, v2 = var, "rejected pair candidate");
                    }
                } else if config.variable_sorting {
                    break;
                }
                j += 1;
            }

            if group.len() > 1 {
                symmetries.push(Symmetry::Group(group));
            }
            if stats.limit_reached {
                debug!(limit = config.pair_limit, "pair limit reached");
                break;
            }
            i += 1;
        }

        stats.clause_comparisons = verifier.comparisons();
        SymmetryReport { symmetries, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(clauses: Vec<Vec<i32>>, num_vars: Variable, config: DetectorConfig) -> SymmetryReport {
        SymmetryDetector::new(Cnf::new(num_vars, clauses), config).run()
    }

    #[test]
    fn test_single_mode_finds_negation() {
        let report = run(vec![vec![1, 2], vec![-1, 2]], 2, DetectorConfig::default());
        assert_eq!(report.symmetries, vec![Symmetry::Negation(1)]);
        assert_eq!(report.stats.candidates, 1);
    }

    #[test]
    fn test_single_mode_positive_only_formula() {
        let report = run(vec![vec![1, 2, 3]], 3, DetectorConfig::default());
        assert!(report.symmetries.is_empty());
        assert_eq!(report.stats.candidates, 0);
    }

    #[test]
    fn test_pair_mode_all_pairs() {
        let report = run(vec![vec![1, 2, 3]], 3, DetectorConfig::with_mode(Mode::Pair));
        assert_eq!(
            report.symmetries,
            vec![
                Symmetry::Pair(1, 2),
                Symmetry::Pair(1, 3),
                Symmetry::Pair(2, 3)
            ]
        );
        assert_eq!(report.stats.pairs_checked, 3);
    }

    #[test]
    fn test_groups_chain_partners() {
        let config = DetectorConfig {
            groups: true,
            ..DetectorConfig::with_mode(Mode::Pair)
        };
        let report = run(vec![vec![1, 2, 3]], 3, config);
        assert_eq!(report.symmetries, vec![Symmetry::Group(vec![1, 2, 3])]);
    }

    #[test]
    fn test_groups_skip_members_as_anchors() {
        let config = DetectorConfig {
            groups: true,
            ..DetectorConfig::with_mode(Mode::Pair)
        };
        // 1 and 3 are exchangeable, 2 and 4 are exchangeable.
        let clauses = vec![vec![1, 2], vec![3, 2], vec![1, 4], vec![3, 4]];
        let report = run(clauses, 4, config);
        assert_eq!(
            report.symmetries,
            vec![Symmetry::Group(vec![1, 3]), Symmetry::Group(vec![2, 4])]
        );
    }

    #[test]
    fn test_pair_limit_stops_search() {
        let config = DetectorConfig {
            pair_limit: 2,
            ..DetectorConfig::with_mode(Mode::Pair)
        };
        let report = run(vec![vec![1, 2, 3]], 3, config);
        assert!(report.stats.limit_reached);
        assert_eq!(report.stats.pairs_checked, 2);
        assert_eq!(
            report.symmetries,
            vec![Symmetry::Pair(1, 2), Symmetry::Pair(1, 3)]
        );
    }

    #[test]
    fn test_sorted_scan_breaks_on_signature_change() {
        let config = DetectorConfig {
            variable_sorting: true,
            ..DetectorConfig::with_mode(Mode::Pair)
        };
        // Signatures: 1 -> (1,0), 2 -> (2,0), 3 -> (1,0).
        let report = run(vec![vec![1, 2], vec![2, 3]], 3, config);
        assert_eq!(report.symmetries, vec![Symmetry::Pair(1, 3)]);
        // (1,3) match, (1,2) breaks; then (3,2) breaks; 2 has no successor.
        assert_eq!(report.stats.pairs_checked, 3);
    }

    #[test]
    fn test_run_is_repeatable() {
        let config = DetectorConfig {
            sort_clauses: true,
            sort_literals: true,
            clause_swapping: true,
            ..DetectorConfig::default()
        };
        let mut detector = SymmetryDetector::new(
            Cnf::new(3, vec![vec![2, 1], vec![-1, 2], vec![3, -2], vec![-3, -2]]),
            config,
        );
        let first = detector.run();
        let second = detector.run();
        assert_eq!(first, second);
        assert_eq!(
            first.symmetries,
            vec![Symmetry::Negation(1), Symmetry::Negation(3)]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Symmetry::Negation(4).to_string(), "-4 4 0");
        assert_eq!(Symmetry::Pair(1, 2).to_string(), "-1 2 0");
        assert_eq!(
            Symmetry::Group(vec![1, 2, 5]).to_string(),
            "found symmetry group: 1 2 5 "
        );
    }

    #[test]
    fn test_group_substitutions_follow_the_chain() {
        assert_eq!(
            Symmetry::Group(vec![1, 2, 5]).substitutions(),
            vec![Substitution::Swap(1, 2), Substitution::Swap(2, 5)]
        );
    }
}
