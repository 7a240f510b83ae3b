//! Per-step phase state machine.

use std::fmt;

/// Where a [`NearestWorld`](crate::NearestWorld) is within its current step.
///
/// ```text
/// Idle ──▶ Sorting ──▶ Searching ──▶ Done
///   ▲                                  │
///   └──────────── next step ───────────┘
/// ```
///
/// A cancelled or failed step drops back to `Idle` instead of reaching
/// `Done`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No step in progress and no results available.
    #[default]
    Idle,
    /// Positions loaded; the target index is being built.
    Sorting,
    /// Index built; the batch executor is running.
    Searching,
    /// The executor has joined; results are readable.
    Done,
}

impl Phase {
    /// Whether results of the last step may be read in this phase.
    pub fn has_results(self) -> bool {
        self == Self::Done
    }

    /// The phase a step moves to next, or `None` from `Done`.
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::Sorting),
            Self::Sorting => Some(Self::Searching),
            Self::Searching => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Sorting => write!(f, "sorting"),
            Self::Searching => write!(f, "searching"),
            Self::Done => write!(f, "done"),
        }
    }
}
