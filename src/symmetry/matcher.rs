#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Clause-level matching under a substitution.
//!
//! Two clauses match when they have the same length and their literals can be
//! paired so that every literal `l` of the first clause meets either `l` itself
//! or its image under the substitution in the second.
//!
//! The default algorithm is greedy: for position `i` of the first clause it
//! scans positions `i..` of the second for a partner and swaps the partner to
//! position `i`, so the unmatched literals always form a shrinking suffix. The
//! swaps happen on a scratch copy; the clause store is never touched.
//!
//! When clauses have been put in magnitude order and the substitution keeps
//! every literal on its variable, partners sit at the same position and a
//! single linear pass suffices.
//!
//! Greedy pairing never backtracks. That is exact for clauses without repeated
//! literals or complementary pairs; on such pathological clauses the result may
//! differ from a full bipartite matching.

use crate::symmetry::clause::Clause;
use crate::symmetry::literal::Literal;
use crate::symmetry::substitution::Substitution;
use smallvec::SmallVec;

#[derive(Debug, Clone, Default)]
pub struct ClauseMatcher {
    sorted_literals: bool,
    scratch: SmallVec<[Literal; 16]>,
    comparisons: u64,
}

impl ClauseMatcher {
    /// Creates a matcher; `sorted_literals` promises that every clause it will
    /// see has been through [`Clause::sort_literals`].
    #[must_use]
    pub fn new(sorted_literals: bool) -> Self {
        Self {
            sorted_literals,
            ..Self::default()
        }
    }

    /// Number of clause pairs compared so far.
    #[must_use]
    pub const fn comparisons(&self) -> u64 {
        self.comparisons
    }

    /// Decides whether `c2` is `c1` up to `substitution`.
    pub fn matches(&mut self, c1: &Clause, c2: &Clause, substitution: Substitution) -> bool {
        self.comparisons += 1;

        if c1.len() != c2.len() {
            return false;
        }

        if self.sorted_literals && substitution.preserves_variables() {
            return Self::matches_sorted(c1, c2, substitution);
        }

        self.matches_greedy(c1, c2, substitution)
    }

    fn matches_greedy(&mut self, c1: &Clause, c2: &Clause, substitution: Substitution) -> bool {
        let scratch = &mut self.scratch;
        scratch.clear();
        scratch.extend_from_slice(c2.literals());

        for (i, &lit) in c1.iter().enumerate() {
            let image = substitution.apply(lit);
            let Some(j) = (i..scratch.len()).find(|&j| scratch[j] == lit || scratch[j] == image)
            else {
                return false;
            };
            scratch.swap(i, j);
        }

        true
    }

    fn matches_sorted(c1: &Clause, c2: &Clause, substitution: Substitution) -> bool {
        c1.iter()
            .zip(c2.iter())
            .all(|(&a, &b)| a == b || b == substitution.apply(a))
    }
}
