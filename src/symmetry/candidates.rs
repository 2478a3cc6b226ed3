//! Cheap necessary conditions for a symmetry.
//!
//! Any substitution that maps the formula onto itself maps occurrence lists
//! onto occurrence lists of the same length, so comparing counts can only
//! discard candidates that verification would reject anyway. A variable
//! whose positive count is zero is never a candidate.

use crate::symmetry::literal::{Literal, Variable};
use crate::symmetry::occurrence::OccurrenceIndex;

/// Default cap on the number of variable pairs examined in pair mode.
pub const PAIR_LIMIT: u64 = 1_000_000_000;

/// `var` can only be symmetric with its negation if both polarities occur
/// equally often.
#[must_use]
pub fn is_single_candidate(index: &OccurrenceIndex, var: Variable) -> bool {
    let signature = index.signature(var);
    signature.positive != 0 && signature.positive == signature.negative
}

/// Variables of `order` that pass [`is_single_candidate`], in that order.
#[must_use]
pub fn single_candidates(index: &OccurrenceIndex, order: &[Variable]) -> Vec<Variable> {
    order
        .iter()
        .copied()
        .filter(|&var| is_single_candidate(index, var))
        .collect()
}

/// `v1` and `v2` can only be exchanged if they have the same signature and
/// `v1` occurs positively.
#[must_use]
pub fn is_pair_candidate(index: &OccurrenceIndex, v1: Variable, v2: Variable) -> bool {
    v1 != v2
        && index.count(Literal::positive(v1)) != 0
        && index.signature(v1) == index.signature(v2)
}
