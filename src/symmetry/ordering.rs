#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Optional reorderings applied before verification.
//!
//! None of these change which symmetries exist; they only change the order in
//! which variables, clauses and literals reach the verifier:
//!
//! - `sort_variables`: ascending `(count(+v), count(-v))`, so variables with
//!   equal signatures are adjacent and a pair scan can stop at the first
//!   signature mismatch.
//! - `sort_clauses_by_size`: candidate occurrence lists by clause length, so
//!   clauses of equal length are tried first.
//! - `sort_literals`: every clause touched by a candidate in magnitude order,
//!   enabling the position-wise clause match.

use crate::symmetry::cnf::Cnf;
use crate::symmetry::literal::{Literal, Variable};
use crate::symmetry::occurrence::OccurrenceIndex;
use bit_vec::BitVec;

/// Stable sort of `vars` by ascending occurrence signature.
pub fn sort_variables(index: &OccurrenceIndex, vars: &mut [Variable]) {
    vars.sort_by_key(|&var| index.signature(var));
}

/// Stable sort of both occurrence lists of every variable in `vars` by the
/// length of the referenced clause.
pub fn sort_clauses_by_size(cnf: &Cnf, index: &mut OccurrenceIndex, vars: &[Variable]) {
    for &var in vars {
        for lit in [Literal::positive(var), Literal::negative(var)] {
            index
                .occurrences_mut(lit)
                .sort_by_key(|&c_ref| cnf[c_ref].len());
        }
    }
}

/// Canonicalises the literal order of every clause occurring with a variable
/// of `vars`. Each clause is sorted at most once. Returns the number of
/// clauses sorted.
pub fn sort_literals(cnf: &mut Cnf, index: &OccurrenceIndex, vars: &[Variable]) -> usize {
    let mut done = BitVec::from_elem(cnf.len(), false);
    let mut sorted = 0;

    for &var in vars {
        for lit in [Literal::positive(var), Literal::negative(var)] {
            for &c_ref in index.occurrences(lit) {
                if done[c_ref] {
                    continue;
                }
                cnf.clause_mut(c_ref).sort_literals();
                done.set(c_ref, true);
                sorted += 1;
            }
        }
    }

    sorted
}
