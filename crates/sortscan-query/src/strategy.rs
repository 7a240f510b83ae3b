//! Query strategies.

use std::fmt;

/// How the executor finds each seeker's nearest target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Binary search into the sorted index plus a pruned scan in both
    /// directions. Requires the index to be rebuilt each step.
    #[default]
    SortPruned,
    /// Compare every seeker against every target, O(N×M). Needs no index;
    /// kept as a baseline for benchmarks and verification.
    BruteForce,
}

impl Strategy {
    /// Whether this strategy reads the sorted target index.
    pub fn needs_index(self) -> bool {
        matches!(self, Self::SortPruned)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SortPruned => write!(f, "sort-pruned"),
            Self::BruteForce => write!(f, "brute-force"),
        }
    }
}
