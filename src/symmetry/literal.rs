#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Signed literals over a dense variable range.
//!
//! A literal is stored as a single `u32` code, `variable << 1 | negative`, so
//! that both polarities of a variable sit in adjacent slots. This lets the
//! occurrence index address per-literal tables with `Literal::index` instead of
//! negative offsets, and makes the derived ordering sort by magnitude first.

use std::fmt::{Display, Formatter};

/// Variable identifier in `1..=num_vars`.
pub type Variable = u32;

/// A variable together with a polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal(u32);

impl Literal {
    /// Creates the literal of `var` with the given polarity (`true` = positive).
    #[must_use]
    pub const fn new(var: Variable, polarity: bool) -> Self {
        Self((var << 1) | ((!polarity) as u32))
    }

    /// Positive literal of `var`.
    #[must_use]
    pub const fn positive(var: Variable) -> Self {
        Self::new(var, true)
    }

    /// Negative literal of `var`.
    #[must_use]
    pub const fn negative(var: Variable) -> Self {
        Self::new(var, false)
    }

    /// Converts a DIMACS literal. The caller guarantees `value != 0`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        Self::new(value.unsigned_abs(), value > 0)
    }

    /// DIMACS representation of the literal.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_i32(self) -> i32 {
        let var = self.variable() as i32;
        if self.polarity() { var } else { -var }
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    /// Dense slot of this literal in a table sized `2 * (num_vars + 1)`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_i32())
    }
}
