//! [`SortedTargets`]: a target slice known to be sorted along an axis.

use sortscan_core::{Axis, Point3};

use crate::order::is_sorted_along;

/// Read-only view of a target buffer sorted along [`axis()`](Self::axis).
///
/// Obtained from [`build_index`](crate::build_index) (which sorts and then
/// downgrades its `&mut` borrow to this shared view) or from
/// [`verify()`](Self::verify) for buffers sorted elsewhere. Holding one is
/// proof that the sort has finished: the builder's exclusive borrow has
/// ended, and nothing can reorder the buffer while the view is alive.
#[derive(Clone, Copy, Debug)]
pub struct SortedTargets<'a> {
    points: &'a [Point3],
    axis: Axis,
}

impl<'a> SortedTargets<'a> {
    /// Wrap a slice the builder has just sorted.
    pub(crate) fn from_sorted(points: &'a [Point3], axis: Axis) -> Self {
        debug_assert!(is_sorted_along(points, axis));
        Self { points, axis }
    }

    /// Wrap `points` if it is already non-decreasing along `axis`.
    ///
    /// Returns `None` if any adjacent pair is out of order. O(M).
    pub fn verify(points: &'a [Point3], axis: Axis) -> Option<Self> {
        is_sorted_along(points, axis).then_some(Self { points, axis })
    }

    /// An empty index. Every query against it yields an absent result.
    pub fn empty(axis: Axis) -> Self {
        Self { points: &[], axis }
    }

    /// The sorted positions.
    pub fn as_slice(&self) -> &'a [Point3] {
        self.points
    }

    /// The axis the positions are sorted along.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of targets.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index holds no targets.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_sorted() {
        let pts = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let sorted = SortedTargets::verify(&pts, Axis::X).unwrap();
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted.axis(), Axis::X);
    }

    #[test]
    fn verify_rejects_unsorted() {
        let pts = [Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 0.0, 0.0)];
        assert!(SortedTargets::verify(&pts, Axis::X).is_none());
        // Same points are sorted along a different axis.
        let pts = [Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)];
        assert!(SortedTargets::verify(&pts, Axis::Y).is_some());
    }

    #[test]
    fn empty_index_is_empty() {
        let sorted = SortedTargets::empty(Axis::Z);
        assert!(sorted.is_empty());
        assert_eq!(sorted.axis(), Axis::Z);
    }
}
