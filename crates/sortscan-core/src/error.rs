//! Error types for the sortscan engine.
//!
//! Organized by subsystem: query (the nearest-target executor) and step
//! (the per-step pipeline that drives it). Every variant here is a caller
//! contract violation or a cancellation; an empty target set is not an
//! error and is reported per seeker as an absent result instead.

use std::error::Error;
use std::fmt;

/// Which buffer a length check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferRole {
    /// The seeker positions.
    Seekers,
    /// The target positions.
    Targets,
    /// The per-seeker result slots.
    Results,
}

impl fmt::Display for BufferRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seekers => write!(f, "seekers"),
            Self::Targets => write!(f, "targets"),
            Self::Results => write!(f, "results"),
        }
    }
}

/// Errors from the nearest-target executor.
///
/// Always raised synchronously, before any batch is scheduled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// A buffer does not have the length the query requires.
    LengthMismatch {
        /// The offending buffer.
        buffer: BufferRole,
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },
    /// Batch size was zero; every batch must cover at least one seeker.
    ZeroBatchSize,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{buffer} buffer has length {actual}, expected {expected}"
            ),
            Self::ZeroBatchSize => write!(f, "batch size must be at least 1"),
        }
    }
}

impl Error for QueryError {}

/// Errors from one engine step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The executor rejected its inputs.
    Query(QueryError),
    /// A position source supplied a different number of positions than
    /// the engine was configured for.
    InputLength {
        /// Which set was supplied with the wrong length.
        buffer: BufferRole,
        /// The configured length.
        expected: usize,
        /// The length the source reported.
        actual: usize,
    },
    /// The step was cancelled at a batch boundary. Its partial results
    /// are discarded.
    Cancelled {
        /// Batches that ran to completion before the cancellation was seen.
        completed_batches: usize,
        /// Batches the step was split into.
        batches: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(e) => write!(f, "query: {e}"),
            Self::InputLength {
                buffer,
                expected,
                actual,
            } => write!(
                f,
                "{buffer} source supplied {actual} positions, configured for {expected}"
            ),
            Self::Cancelled {
                completed_batches,
                batches,
            } => write!(
                f,
                "step cancelled after {completed_batches} of {batches} batches"
            ),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Query(e) => Some(e),
            _ => None,
        }
    }
}

impl From<QueryError> for StepError {
    fn from(e: QueryError) -> Self {
        Self::Query(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_mismatch_display_names_buffer() {
        let err = QueryError::LengthMismatch {
            buffer: BufferRole::Results,
            expected: 10,
            actual: 9,
        };
        let msg = format!("{err}");
        assert!(msg.contains("results"));
        assert!(msg.contains("10"));
        assert!(msg.contains("9"));
    }

    #[test]
    fn step_error_wraps_query_error_as_source() {
        let err = StepError::from(QueryError::ZeroBatchSize);
        assert_eq!(err, StepError::Query(QueryError::ZeroBatchSize));
        assert!(err.source().is_some());
    }

    #[test]
    fn cancelled_has_no_source() {
        let err = StepError::Cancelled {
            completed_batches: 3,
            batches: 8,
        };
        assert!(err.source().is_none());
        assert!(format!("{err}").contains("3 of 8"));
    }
}
