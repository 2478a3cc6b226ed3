#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause store: the parsed formula together with its declared
//! variable range.
//!
//! Clauses are kept in input order in a single arena and referred to by
//! [`ClauseRef`], their position in that arena. Nothing is ever removed, so a
//! reference stays valid for the lifetime of the store.

use crate::symmetry::clause::Clause;
use crate::symmetry::literal::Variable;
use std::fmt::{Display, Formatter};
use std::ops::{Index, RangeInclusive};

/// Position of a clause in [`Cnf::clauses`].
pub type ClauseRef = usize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    /// Declared variable count; every literal magnitude is in `1..=num_vars`.
    pub num_vars: Variable,
    /// All clauses, in input order.
    pub clauses: Vec<Clause>,
    /// First empty clause seen, if any. Recorded but not otherwise used.
    pub empty_clause: Option<ClauseRef>,
    /// Total number of literal occurrences over all clauses.
    pub num_literals: usize,
}

impl Cnf {
    /// Builds a store from DIMACS-style clauses.
    ///
    /// The caller is responsible for every literal magnitude being at most
    /// `num_vars`; the parser checks this before getting here.
    pub fn new<J, I>(num_vars: Variable, clauses: J) -> Self
    where
        J: IntoIterator<Item = I>,
        I: AsRef<[i32]>,
    {
        let mut cnf = Self {
            num_vars,
            ..Self::default()
        };
        for clause in clauses {
            cnf.add_clause(Clause::new(clause.as_ref()));
        }
        cnf
    }

    /// Appends a clause and returns its reference.
    pub fn add_clause(&mut self, clause: Clause) -> ClauseRef {
        let c_ref = self.clauses.len();
        debug_assert!(
            clause
                .iter()
                .all(|lit| lit.variable() >= 1 && lit.variable() <= self.num_vars),
            "clause {clause} exceeds variable range {}",
            self.num_vars
        );
        if clause.is_empty() && self.empty_clause.is_none() {
            self.empty_clause = Some(c_ref);
        }
        self.num_literals += clause.len();
        self.clauses.push(clause);
        c_ref
    }

    pub fn clause_mut(&mut self, c_ref: ClauseRef) -> &mut Clause {
        &mut self.clauses[c_ref]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Every variable of the declared range, in ascending order.
    #[must_use]
    pub const fn variables(&self) -> RangeInclusive<Variable> {
        1..=self.num_vars
    }
}

impl Index<ClauseRef> for Cnf {
    type Output = Clause;

    fn index(&self, index: ClauseRef) -> &Self::Output {
        &self.clauses[index]
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}
