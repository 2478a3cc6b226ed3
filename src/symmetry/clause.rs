use crate::symmetry::literal::Literal;
use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{Display, Formatter};

/// Inline capacity of a clause; longer clauses spill to the heap.
pub const INLINE_LITERALS: usize = 8;

/// A disjunction of literals in input order.
///
/// Literal order carries no meaning during matching unless
/// [`Clause::sort_literals`] has canonicalised it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause {
    literals: SmallVec<[Literal; INLINE_LITERALS]>,
}

impl Clause {
    #[must_use]
    pub fn new(literals: &[i32]) -> Self {
        literals.iter().copied().map(Literal::from_i32).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    #[must_use]
    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    /// Puts the literals in magnitude order. Both polarities of one variable
    /// compare by sign, so the result is independent of input order.
    pub fn sort_literals(&mut self) {
        self.literals.sort_unstable();
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Self {
            literals: iter.into_iter().collect(),
        }
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{} 0", self.literals.iter().join(" "))
    }
}
