//! Per-step performance metrics for the nearest-target engine.
//!
//! [`StepMetrics`] captures timing and work counters for a single step.

/// Timing and work counters collected during a single step.
///
/// All durations are in microseconds. The engine populates these fields
/// after each successful `step()` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Time spent copying positions out of the sources, in microseconds.
    pub load_us: u64,
    /// Time spent sorting the target index, in microseconds.
    pub sort_us: u64,
    /// Time spent in the batch executor including the join, in microseconds.
    pub query_us: u64,
    /// Executor batches dispatched.
    pub batches: usize,
    /// Full squared-distance evaluations across all seekers.
    pub candidates_examined: u64,
}

impl StepMetrics {
    /// Mean full distance evaluations per seeker, or `0.0` with no seekers.
    ///
    /// Equals the target count under brute force; the gap to that number
    /// is what pruning saves.
    pub fn examined_per_seeker(&self, seeker_count: usize) -> f64 {
        if seeker_count == 0 {
            0.0
        } else {
            self.candidates_examined as f64 / seeker_count as f64
        }
    }
}
