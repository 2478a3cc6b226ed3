#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Verification of symmetry candidates over the occurrence index.
//!
//! A candidate is accepted when the clauses of one occurrence list can be
//! matched one-to-one onto the clauses of another under the candidate's
//! substitution. Each such one-directional pass is a *sweep*:
//!
//! - Negation of `v`: sweep `+v -> -v`, then `-v -> +v` unless the strategy
//!   reports that the first sweep already covers the reverse.
//! - Swap of `v1` and `v2`: sweep `+v1 -> +v2`, then `-v1 -> -v2`.
//!
//! Two sweep strategies are provided and give identical answers:
//!
//! - `Exhaustive`: every source clause searches the whole target list for a
//!   partner not yet used in this sweep. Negations are swept both ways.
//! - `ClauseSwapping`: matched targets are swapped to the front of a scratch
//!   copy of the target list, so each source clause only searches the
//!   unmatched suffix. Negations are swept one way only: on lists of equal
//!   length a complete sweep is already a bijection.

use crate::symmetry::cnf::{ClauseRef, Cnf};
use crate::symmetry::literal::{Literal, Variable};
use crate::symmetry::matcher::ClauseMatcher;
use crate::symmetry::occurrence::OccurrenceIndex;
use crate::symmetry::substitution::Substitution;
use bit_vec::BitVec;
use std::fmt::{Debug, Display, Formatter};
use tracing::trace;

/// Trait defining how the clauses of one occurrence list are paired with
/// the clauses of another.
pub trait MatchingStrategy: Debug {
    /// Tries to give every clause of `from` a distinct partner in `to`.
    ///
    /// Callers guarantee `from.len() == to.len()`.
    fn sweep(
        &mut self,
        cnf: &Cnf,
        from: &[ClauseRef],
        to: &[ClauseRef],
        substitution: Substitution,
        matcher: &mut ClauseMatcher,
    ) -> bool;

    /// Whether a successful sweep already proves the reverse direction.
    fn covers_reverse(&self) -> bool;
}

/// Pairs each source clause with the first unused matching target, searching
/// the full target list every time.
#[derive(Debug, Clone, Default)]
pub struct Exhaustive {
    used: BitVec,
}

impl MatchingStrategy for Exhaustive {
    fn sweep(
        &mut self,
        cnf: &Cnf,
        from: &[ClauseRef],
        to: &[ClauseRef],
        substitution: Substitution,
        matcher: &mut ClauseMatcher,
    ) -> bool {
        self.used.truncate(0);
        self.used.grow(to.len(), false);

        for &c_ref in from {
            let used = &self.used;
            let Some(j) = (0..to.len()).find(|&j| {
                !used[j] && matcher.matches(&cnf[c_ref], &cnf[to[j]], substitution)
            }) else {
                return false;
            };
            self.used.set(j, true);
        }

        true
    }

    fn covers_reverse(&self) -> bool {
        false
    }
}

/// Pairs each source clause with a target from the unmatched suffix of a
/// scratch copy of the target list, moving the partner to the front.
#[derive(Debug, Clone, Default)]
pub struct ClauseSwapping {
    pool: Vec<ClauseRef>,
}

impl MatchingStrategy for ClauseSwapping {
    fn sweep(
        &mut self,
        cnf: &Cnf,
        from: &[ClauseRef],
        to: &[ClauseRef],
        substitution: Substitution,
        matcher: &mut ClauseMatcher,
    ) -> bool {
        self.pool.clear();
        self.pool.extend_from_slice(to);

        for (i, &c_ref) in from.iter().enumerate() {
            let pool = &self.pool;
            let Some(j) = (i..pool.len())
                .find(|&j| matcher.matches(&cnf[c_ref], &cnf[pool[j]], substitution))
            else {
                return false;
            };
            self.pool.swap(i, j);
        }

        true
    }

    fn covers_reverse(&self) -> bool {
        true
    }
}

/// Possible matching strategy implementations.
#[derive(Debug, Clone)]
pub enum MatchingStrategyImpls {
    /// Full search of the target list.
    Exhaustive(Exhaustive),
    /// Shrinking-suffix search with swap-to-front.
    ClauseSwapping(ClauseSwapping),
}

impl Default for MatchingStrategyImpls {
    fn default() -> Self {
        Self::Exhaustive(Exhaustive::default())
    }
}

impl MatchingStrategy for MatchingStrategyImpls {
    fn sweep(
        &mut self,
        cnf: &Cnf,
        from: &[ClauseRef],
        to: &[ClauseRef],
        substitution: Substitution,
        matcher: &mut ClauseMatcher,
    ) -> bool {
        match self {
            Self::Exhaustive(s) => s.sweep(cnf, from, to, substitution, matcher),
            Self::ClauseSwapping(s) => s.sweep(cnf, from, to, substitution, matcher),
        }
    }

    fn covers_reverse(&self) -> bool {
        match self {
            Self::Exhaustive(s) => s.covers_reverse(),
            Self::ClauseSwapping(s) => s.covers_reverse(),
        }
    }
}

/// Enum representing the matching strategy to use during verification.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default)]
pub enum MatchingStrategyType {
    /// Search the whole target list for every clause.
    #[default]
    Exhaustive,
    /// Search only the unmatched suffix of the target list.
    ClauseSwapping,
}

impl Display for MatchingStrategyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exhaustive => write!(f, "exhaustive"),
            Self::ClauseSwapping => write!(f, "clause-swapping"),
        }
    }
}

impl MatchingStrategyType {
    /// Converts the `MatchingStrategyType` to a concrete `MatchingStrategyImpls`.
    #[must_use]
    pub fn to_impl(self) -> MatchingStrategyImpls {
        match self {
            Self::Exhaustive => MatchingStrategyImpls::Exhaustive(Exhaustive::default()),
            Self::ClauseSwapping => {
                MatchingStrategyImpls::ClauseSwapping(ClauseSwapping::default())
            }
        }
    }
}

/// Checks candidates against a formula and its occurrence index.
#[derive(Debug)]
pub struct Verifier<'a> {
    cnf: &'a Cnf,
    index: &'a OccurrenceIndex,
    strategy: MatchingStrategyImpls,
    matcher: ClauseMatcher,
}

impl<'a> Verifier<'a> {
    #[must_use]
    pub fn new(
        cnf: &'a Cnf,
        index: &'a OccurrenceIndex,
        strategy: MatchingStrategyType,
        sorted_literals: bool,
    ) -> Self {
        Self {
            cnf,
            index,
            strategy: strategy.to_impl(),
            matcher: ClauseMatcher::new(sorted_literals),
        }
    }

    /// Whether exchanging `var` and `-var` maps the formula onto itself.
    pub fn verify_negation(&mut self, var: Variable) -> bool {
        let pos = Literal::positive(var);
        let neg = Literal::negative(var);
        let substitution = Substitution::Negate(var);

        if !self.sweep(pos, neg, substitution) {
            return false;
        }
        self.strategy.covers_reverse() || self.sweep(neg, pos, substitution)
    }

    /// Whether exchanging `v1` and `v2` (keeping polarities) maps the
    /// formula onto itself.
    pub fn verify_pair(&mut self, v1: Variable, v2: Variable) -> bool {
        let substitution = Substitution::Swap(v1, v2);

        self.sweep(Literal::positive(v1), Literal::positive(v2), substitution)
            && self.sweep(Literal::negative(v1), Literal::negative(v2), substitution)
    }

    /// Clause pairs compared by this verifier so far.
    #[must_use]
    pub const fn comparisons(&self) -> u64 {
        self.matcher.comparisons()
    }

    fn sweep(&mut self, from: Literal, to: Literal, substitution: Substitution) -> bool {
        let from_list = self.index.occurrences(from);
        let to_list = self.index.occurrences(to);

        if from_list.len() != to_list.len() {
            trace!(%from, %to, "occurrence counts differ");
            return false;
        }

        let matched = self.strategy.sweep(
            self.cnf,
            from_list,
            to_list,
            substitution,
            &mut self.matcher,
        );
        trace!(%from, %to, %substitution, matched, "sweep");
        matched
    }
}
