//! Axis comparator and the sortedness invariant.

use std::cmp::Ordering;

use sortscan_core::{Axis, Point3};

/// Order two points by their coordinate along `axis`.
///
/// Equivalent to `sign(a.axis - b.axis)` for finite coordinates. Uses the
/// IEEE 754 total order so the comparator stays a total order even when a
/// coordinate is NaN: such a point lands at one end of the index instead of
/// making the sort panic. Its position is otherwise unspecified, and NaN
/// inputs are not supported beyond "does not crash".
#[inline]
pub fn axis_order(a: &Point3, b: &Point3, axis: Axis) -> Ordering {
    a.coord(axis).total_cmp(&b.coord(axis))
}

/// Whether `points` is non-decreasing along `axis`.
///
/// Adjacent pairs are compared with [`axis_order`], so ties in any relative
/// order are accepted.
pub fn is_sorted_along(points: &[Point3], axis: Axis) -> bool {
    points
        .windows(2)
        .all(|w| axis_order(&w[0], &w[1], axis) != Ordering::Greater)
}
