#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Occurrence lists: for every literal, the clauses containing it.
//!
//! The lists are stored in one table addressed by [`Literal::index`], so both
//! polarities of a variable are adjacent and lookups are O(1). Membership is
//! fixed once the index is built. The ordering heuristics may permute a list,
//! which only changes the order in which the verifier visits its clauses.

use crate::symmetry::cnf::{ClauseRef, Cnf};
use crate::symmetry::literal::{Literal, Variable};
use smallvec::SmallVec;

/// Occurrence list of a single literal. Most literals occur only a handful
/// of times, so short lists stay inline.
pub type OccurrenceList = SmallVec<[ClauseRef; 6]>;

/// Positive and negative occurrence counts of a variable.
///
/// Ordered by positive count first, which is the order the variable sorting
/// heuristic uses to make variables with equal signatures adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Signature {
    pub positive: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OccurrenceIndex(Vec<OccurrenceList>);

impl OccurrenceIndex {
    /// Connects every literal of every clause of `cnf`.
    #[must_use]
    pub fn new(cnf: &Cnf) -> Self {
        let slots = 2 * (cnf.num_vars as usize + 1);
        let mut lists = vec![OccurrenceList::new(); slots];

        for (c_ref, clause) in cnf.iter().enumerate() {
            for &lit in clause.iter() {
                lists[lit.index()].push(c_ref);
            }
        }

        Self(lists)
    }

    #[must_use]
    pub fn occurrences(&self, lit: Literal) -> &[ClauseRef] {
        &self.0[lit.index()]
    }

    pub fn occurrences_mut(&mut self, lit: Literal) -> &mut [ClauseRef] {
        &mut self.0[lit.index()]
    }

    #[must_use]
    pub fn count(&self, lit: Literal) -> usize {
        self.0[lit.index()].len()
    }

    #[must_use]
    pub fn signature(&self, var: Variable) -> Signature {
        Signature {
            positive: self.count(Literal::positive(var)),
            negative: self.count(Literal::negative(var)),
        }
    }
}
