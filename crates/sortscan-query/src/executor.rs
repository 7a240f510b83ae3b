//! Parallel batch executor.
//!
//! Splits the seeker range `[0, N)` into contiguous batches of
//! `batch_size`, pairs each seeker batch with its own `&mut` chunk of the
//! result buffer, and runs the batches on the current rayon pool. Every
//! call returns only after all batches have finished, so the result buffer
//! is fully written (or the report says otherwise) by the time the caller
//! sees it again.
//!
//! Input contracts are checked before anything is scheduled.

use rayon::prelude::*;
use sortscan_core::{BufferRole, Nearest, Point3, QueryError};
use sortscan_index::SortedTargets;

use crate::cancel::CancelToken;
use crate::search::{nearest_exhaustive, nearest_sorted, Hit};

/// Summary of one executor run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryReport {
    /// Batches the seeker range was split into.
    pub batches: usize,
    /// Batches that ran. Less than `batches` only after cancellation.
    pub completed_batches: usize,
    /// Full squared-distance evaluations across all completed batches.
    pub candidates_examined: u64,
}

impl QueryReport {
    /// Whether every batch ran, i.e. every result slot was written.
    pub fn is_complete(&self) -> bool {
        self.completed_batches == self.batches
    }
}

/// Nearest target for every seeker, as a new buffer aligned with `seekers`.
///
/// `results[i]` is `None` exactly when `targets` is empty.
///
/// # Errors
///
/// [`QueryError::ZeroBatchSize`] if `batch_size` is zero.
pub fn query_nearest(
    seekers: &[Point3],
    targets: SortedTargets<'_>,
    batch_size: usize,
) -> Result<Vec<Nearest>, QueryError> {
    let mut results = vec![None; seekers.len()];
    query_nearest_into(seekers, targets, &mut results, batch_size)?;
    Ok(results)
}

/// Nearest target for every seeker, written into caller-owned `results`.
///
/// # Errors
///
/// [`QueryError::ZeroBatchSize`] if `batch_size` is zero, or
/// [`QueryError::LengthMismatch`] if `results` and `seekers` differ in
/// length. Nothing is written on error.
pub fn query_nearest_into(
    seekers: &[Point3],
    targets: SortedTargets<'_>,
    results: &mut [Nearest],
    batch_size: usize,
) -> Result<QueryReport, QueryError> {
    run_batches(seekers, results, batch_size, None, |seeker| {
        nearest_sorted(seeker, targets)
    })
}

/// Like [`query_nearest_into`], but stops dispatching batches once `cancel`
/// is triggered.
///
/// Slots belonging to skipped batches keep whatever they held before the
/// call. Check [`QueryReport::is_complete`] before trusting `results`.
pub fn query_nearest_cancellable(
    seekers: &[Point3],
    targets: SortedTargets<'_>,
    results: &mut [Nearest],
    batch_size: usize,
    cancel: &CancelToken,
) -> Result<QueryReport, QueryError> {
    run_batches(seekers, results, batch_size, Some(cancel), |seeker| {
        nearest_sorted(seeker, targets)
    })
}

/// Exhaustive O(N×M) nearest search on the same batch executor.
///
/// `targets` may be in any order. Cancellation behaves as in
/// [`query_nearest_cancellable`].
pub fn brute_force_into(
    seekers: &[Point3],
    targets: &[Point3],
    results: &mut [Nearest],
    batch_size: usize,
    cancel: Option<&CancelToken>,
) -> Result<QueryReport, QueryError> {
    run_batches(seekers, results, batch_size, cancel, |seeker| {
        nearest_exhaustive(seeker, targets)
    })
}

fn run_batches<F>(
    seekers: &[Point3],
    results: &mut [Nearest],
    batch_size: usize,
    cancel: Option<&CancelToken>,
    kernel: F,
) -> Result<QueryReport, QueryError>
where
    F: Fn(&Point3) -> Option<Hit> + Sync,
{
    if batch_size == 0 {
        return Err(QueryError::ZeroBatchSize);
    }
    if results.len() != seekers.len() {
        return Err(QueryError::LengthMismatch {
            buffer: BufferRole::Results,
            expected: seekers.len(),
            actual: results.len(),
        });
    }

    let batches = seekers.len().div_ceil(batch_size);
    let (completed_batches, candidates_examined) = results
        .par_chunks_mut(batch_size)
        .zip(seekers.par_chunks(batch_size))
        .map(|(out, batch)| {
            if cancel.is_some_and(CancelToken::is_cancelled) {
                return (0usize, 0u64);
            }
            let mut examined = 0u64;
            for (slot, seeker) in out.iter_mut().zip(batch) {
                let hit = kernel(seeker);
                examined += hit.map_or(0, |h| h.examined);
                *slot = hit.map(|h| h.position);
            }
            (1, examined)
        })
        .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));

    Ok(QueryReport {
        batches,
        completed_batches,
        candidates_examined,
    })
}
