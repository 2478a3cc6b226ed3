//! Independent check of reported symmetries.
//!
//! Rather than going through the occurrence index, this applies the
//! substitution to every clause of the formula and compares the clause
//! multisets directly. It is slower than the detector and used to
//! double-check its output.

use crate::symmetry::cnf::Cnf;
use crate::symmetry::detector::Symmetry;
use crate::symmetry::literal::Literal;
use crate::symmetry::substitution::Substitution;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type CanonicalClause = SmallVec<[Literal; 8]>;

fn canonical(literals: impl Iterator<Item = Literal>) -> CanonicalClause {
    let mut clause: CanonicalClause = literals.collect();
    clause.sort_unstable();
    clause
}

/// Whether applying `substitution` to every clause yields the same multiset
/// of clauses, each clause read as a multiset of literals.
#[must_use]
pub fn preserves(cnf: &Cnf, substitution: Substitution) -> bool {
    let mut balance: FxHashMap<CanonicalClause, i64> = FxHashMap::default();

    for clause in cnf.iter() {
        *balance.entry(canonical(clause.iter().copied())).or_default() += 1;
        *balance
            .entry(canonical(clause.iter().map(|&lit| substitution.apply(lit))))
            .or_default() -= 1;
    }

    balance.values().all(|&n| n == 0)
}

/// Whether every exchange asserted by `symmetry` holds in `cnf`.
#[must_use]
pub fn is_symmetry(cnf: &Cnf, symmetry: &Symmetry) -> bool {
    symmetry
        .substitutions()
        .into_iter()
        .all(|substitution| preserves(cnf, substitution))
}

/// The first symmetry of `symmetries` that does not hold, if any.
#[must_use]
pub fn first_violation<'a>(cnf: &Cnf, symmetries: &'a [Symmetry]) -> Option<&'a Symmetry> {
    symmetries.iter().find(|s| !is_symmetry(cnf, s))
}
