use crate::symmetry::candidates::PAIR_LIMIT;
use crate::symmetry::verifier::MatchingStrategyType;
use clap::ValueEnum;
use std::fmt::{Display, Formatter};

/// Which kind of symmetry to search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Mode {
    /// A variable exchanged with its own negation.
    #[default]
    Single,
    /// Two variables exchanged with each other.
    Pair,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Pair => write!(f, "pair"),
        }
    }
}

/// Settings of one detection run. The heuristic switches change how much
/// work is done, never which symmetries are reported; `groups` and
/// `pair_limit` change what is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct DetectorConfig {
    pub mode: Mode,
    /// Visit variables by ascending occurrence signature.
    pub variable_sorting: bool,
    /// Chain confirmed pairs into groups (pair mode only).
    pub groups: bool,
    /// Verify with [`MatchingStrategyType::ClauseSwapping`].
    pub clause_swapping: bool,
    /// Sort candidate occurrence lists by clause length.
    pub sort_clauses: bool,
    /// Sort literals of candidate clauses by magnitude.
    pub sort_literals: bool,
    /// Maximum number of variable pairs examined in pair mode.
    pub pair_limit: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            variable_sorting: false,
            groups: false,
            clause_swapping: false,
            sort_clauses: false,
            sort_literals: false,
            pair_limit: PAIR_LIMIT,
        }
    }
}

impl DetectorConfig {
    /// Default settings for the given mode.
    #[must_use]
    pub fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn matching_strategy(&self) -> MatchingStrategyType {
        if self.clause_swapping {
            MatchingStrategyType::ClauseSwapping
        } else {
            MatchingStrategyType::Exhaustive
        }
    }
}
