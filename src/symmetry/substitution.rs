use crate::symmetry::literal::{Literal, Variable};
use std::fmt::{Display, Formatter};

/// A literal relabeling that is its own inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Substitution {
    /// Exchange `v` and `-v`.
    Negate(Variable),
    /// Exchange `v1` with `v2` and `-v1` with `-v2`.
    Swap(Variable, Variable),
}

impl Substitution {
    /// Image of `lit`; literals of untouched variables map to themselves.
    #[must_use]
    pub const fn apply(self, lit: Literal) -> Literal {
        match self {
            Self::Negate(var) if lit.variable() == var => lit.negated(),
            Self::Swap(v1, v2) if lit.variable() == v1 => Literal::new(v2, lit.polarity()),
            Self::Swap(v1, v2) if lit.variable() == v2 => Literal::new(v1, lit.polarity()),
            _ => lit,
        }
    }

    /// Whether every literal keeps its variable, which is what makes
    /// position-wise matching of magnitude-sorted clauses valid.
    #[must_use]
    pub const fn preserves_variables(self) -> bool {
        matches!(self, Self::Negate(_))
    }
}

impl Display for Substitution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negate(var) => write!(f, "{var} <-> -{var}"),
            Self::Swap(v1, v2) => write!(f, "{v1} <-> {v2}"),
        }
    }
}
