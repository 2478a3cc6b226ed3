//! This crate detects simple syntactic symmetries of CNF formulas: variables
//! that can be exchanged with their own negation, and pairs of variables that
//! can be exchanged with each other, without changing the formula.

/// The `symmetry` module implements DIMACS parsing, the occurrence index and
/// the candidate search with its verification strategies.
pub mod symmetry;
