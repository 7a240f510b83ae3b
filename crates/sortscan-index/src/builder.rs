//! Index builder: sort a target buffer in place along one axis.

use rayon::slice::ParallelSliceMut;
use sortscan_core::{Axis, Point3};

use crate::order::axis_order;
use crate::sorted::SortedTargets;

/// Options for [`build_index_with`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexOptions {
    /// Axis to sort along. Default: [`Axis::X`].
    pub axis: Axis,
    /// Target count at or above which the sort runs on the rayon pool
    /// instead of the calling thread. Default: 4096.
    pub parallel_threshold: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            parallel_threshold: 4096,
        }
    }
}

/// Sort `targets` in place along X and return the sorted view.
///
/// Unstable: targets with equal X may end up in any relative order. An
/// empty buffer is a no-op. Slots are not stable across calls, so nothing
/// outside the engine should index targets by position after this runs.
pub fn build_index(targets: &mut [Point3]) -> SortedTargets<'_> {
    build_index_with(targets, IndexOptions::default())
}

/// Sort `targets` in place as configured by `options`.
///
/// When called from inside a rayon pool (e.g. the engine's worker pool)
/// the parallel sort runs on that pool.
pub fn build_index_with(targets: &mut [Point3], options: IndexOptions) -> SortedTargets<'_> {
    let axis = options.axis;
    if targets.len() >= options.parallel_threshold {
        targets.par_sort_unstable_by(|a, b| axis_order(a, b, axis));
    } else {
        targets.sort_unstable_by(|a, b| axis_order(a, b, axis));
    }
    SortedTargets::from_sorted(targets, axis)
}
