//! Single-seeker search kernels.
//!
//! [`nearest_sorted`] is the pruned search used by the executor;
//! [`nearest_exhaustive`] is the O(M) baseline it is measured against.
//! Both compare squared distances only.

use std::cmp::Ordering;

use sortscan_core::{Axis, Point3};
use sortscan_index::SortedTargets;

/// The nearest target found for one seeker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    /// Position of the nearest target.
    pub position: Point3,
    /// Squared distance from the seeker to [`position`](Self::position).
    pub distance_sq: f32,
    /// Number of targets whose full squared distance was evaluated.
    pub examined: u64,
}

impl Hit {
    /// Start the search at `target`.
    ///
    /// A NaN seed distance is stored as infinity: NaN never compares
    /// smaller, so it would otherwise stick and disable pruning.
    fn seed(seeker: &Point3, target: Point3) -> Self {
        let d = seeker.distance_sq(&target);
        Self {
            position: target,
            distance_sq: if d.is_nan() { f32::INFINITY } else { d },
            examined: 1,
        }
    }

    #[inline]
    fn offer(&mut self, seeker: &Point3, candidate: &Point3) {
        self.examined += 1;
        let d = seeker.distance_sq(candidate);
        if d < self.distance_sq {
            self.position = *candidate;
            self.distance_sq = d;
        }
    }
}

/// Index of the first target whose `axis` coordinate is not less than
/// `key` (lower-bound semantics). Returns `targets.len()` if every target
/// is less.
///
/// Uses the same total order as the index builder, so the predicate is
/// partitioned even when the buffer holds NaN coordinates.
pub fn lower_bound(targets: &[Point3], axis: Axis, key: f32) -> usize {
    targets.partition_point(|t| t.coord(axis).total_cmp(&key) == Ordering::Less)
}

/// Nearest target to `seeker` in the sorted index, or `None` if the index
/// is empty.
///
/// Starts at the lower bound of the seeker's axis coordinate (clamped to
/// the last target), then scans up and down. Each direction stops at the
/// first candidate whose squared axis gap exceeds the best squared distance
/// so far: the index is sorted along the axis, so every later candidate in
/// that direction has an axis gap at least as large and cannot be closer.
///
/// Among equally near targets, any one may be returned.
pub fn nearest_sorted(seeker: &Point3, targets: SortedTargets<'_>) -> Option<Hit> {
    let points = targets.as_slice();
    let last = points.len().checked_sub(1)?;
    let axis = targets.axis();

    let start = lower_bound(points, axis, seeker.coord(axis)).min(last);
    let mut best = Hit::seed(seeker, points[start]);

    scan(seeker, axis, points[start + 1..].iter(), &mut best);
    scan(seeker, axis, points[..start].iter().rev(), &mut best);

    Some(best)
}

/// Walk `candidates` (ordered away from the seeker along `axis`) until the
/// axis gap alone rules out any improvement.
#[inline]
fn scan<'a>(
    seeker: &Point3,
    axis: Axis,
    candidates: impl Iterator<Item = &'a Point3>,
    best: &mut Hit,
) {
    let key = seeker.coord(axis);
    for candidate in candidates {
        let gap = key - candidate.coord(axis);
        if gap * gap > best.distance_sq {
            break;
        }
        best.offer(seeker, candidate);
    }
}

/// Nearest target to `seeker` by exhaustive comparison, or `None` if
/// `targets` is empty. Order of `targets` does not matter.
pub fn nearest_exhaustive(seeker: &Point3, targets: &[Point3]) -> Option<Hit> {
    let (first, rest) = targets.split_first()?;
    let mut best = Hit::seed(seeker, *first);
    for candidate in rest {
        best.offer(seeker, candidate);
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscan_index::build_index;

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    // ── lower_bound ────────────────────────────────────────────

    #[test]
    fn lower_bound_finds_first_not_less() {
        let pts = [p(0.0, 0.0, 0.0), p(5.0, 5.0, 0.0), p(10.0, 0.0, 0.0)];
        assert_eq!(lower_bound(&pts, Axis::X, -1.0), 0);
        assert_eq!(lower_bound(&pts, Axis::X, 0.0), 0);
        assert_eq!(lower_bound(&pts, Axis::X, 4.0), 1);
        assert_eq!(lower_bound(&pts, Axis::X, 5.0), 1);
        assert_eq!(lower_bound(&pts, Axis::X, 11.0), 3);
    }

    #[test]
    fn lower_bound_on_ties_returns_first() {
        let pts = [p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0), p(3.0, 0.0, 0.0)];
        assert_eq!(lower_bound(&pts, Axis::X, 2.0), 1);
    }

    // ── nearest_sorted ─────────────────────────────────────────

    #[test]
    fn concrete_scenario_returns_origin() {
        let mut targets = vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(5.0, 5.0, 0.0)];
        let sorted = build_index(&mut targets);
        let hit = nearest_sorted(&p(4.0, 0.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(0.0, 0.0, 0.0));
        assert_eq!(hit.distance_sq, 16.0);
        // Seed (5,5,0) at 26, then (0,0,0); (10,0,0) is pruned since 36 > 26.
        assert_eq!(hit.examined, 2);
    }

    #[test]
    fn empty_index_yields_none() {
        assert!(nearest_sorted(&p(1.0, 2.0, 3.0), SortedTargets::empty(Axis::X)).is_none());
    }

    #[test]
    fn single_target_always_wins() {
        let mut targets = vec![p(7.0, -3.0, 2.0)];
        let sorted = build_index(&mut targets);
        for seeker in [p(-100.0, 0.0, 0.0), p(7.0, -3.0, 2.0), p(1e6, 1e6, 1e6)] {
            assert_eq!(nearest_sorted(&seeker, sorted).unwrap().position, p(7.0, -3.0, 2.0));
        }
    }

    #[test]
    fn seeker_beyond_last_target_clamps_start() {
        let mut targets = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        let sorted = build_index(&mut targets);
        let hit = nearest_sorted(&p(50.0, 0.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(2.0, 0.0, 0.0));
    }

    #[test]
    fn colinear_targets_stop_immediately() {
        let mut targets: Vec<Point3> = (0..100).map(|i| p(i as f32, 0.0, 0.0)).collect();
        let sorted = build_index(&mut targets);
        let hit = nearest_sorted(&p(42.0, 0.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(42.0, 0.0, 0.0));
        // Exact hit: distance 0, both neighbours are pruned by the axis gap.
        assert_eq!(hit.examined, 1);
    }

    #[test]
    fn scan_looks_past_axis_neighbour_when_off_axis() {
        // Closest in x is far away in y; the true nearest is two slots down.
        let mut targets = vec![p(0.0, 0.0, 0.0), p(3.0, 100.0, 0.0), p(4.0, 100.0, 0.0)];
        let sorted = build_index(&mut targets);
        let hit = nearest_sorted(&p(4.0, 0.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(0.0, 0.0, 0.0));
    }

    #[test]
    fn respects_index_axis() {
        let mut targets = vec![p(0.0, 10.0, 0.0), p(100.0, 0.0, 0.0), p(0.0, -3.0, 0.0)];
        let sorted = sortscan_index::build_index_with(
            &mut targets,
            sortscan_index::IndexOptions {
                axis: Axis::Y,
                ..Default::default()
            },
        );
        let hit = nearest_sorted(&p(0.0, 1.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(0.0, -3.0, 0.0));
    }

    #[test]
    fn nan_target_at_start_is_replaced_by_finite_neighbour() {
        let mut targets = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(f32::NAN, 0.0, 0.0)];
        let sorted = build_index(&mut targets);
        // Lower bound of x = 5 clamps onto the NaN target at the end.
        let hit = nearest_sorted(&p(5.0, 0.0, 0.0), sorted).unwrap();
        assert_eq!(hit.position, p(1.0, 0.0, 0.0));
        assert_eq!(hit.distance_sq, 16.0);
        // Seed, (1,0,0), then (0,0,0) is pruned since 25 > 16.
        assert_eq!(hit.examined, 2);
    }

    #[test]
    fn exhaustive_skips_leading_nan_target() {
        let targets = [p(0.0, f32::NAN, 0.0), p(3.0, 0.0, 0.0)];
        let hit = nearest_exhaustive(&Point3::ZERO, &targets).unwrap();
        assert_eq!(hit.position, p(3.0, 0.0, 0.0));
        assert_eq!(hit.distance_sq, 9.0);
    }

    #[test]
    fn nan_seeker_does_not_panic() {
        let mut targets = vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let sorted = build_index(&mut targets);
        let hit = nearest_sorted(&p(f32::NAN, 0.0, 0.0), sorted);
        // Result is unspecified but present and drawn from the targets.
        let hit = hit.unwrap();
        assert!(targets.contains(&hit.position));
    }

    // ── nearest_exhaustive ─────────────────────────────────────

    #[test]
    fn exhaustive_matches_concrete_scenario() {
        let targets = [p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(5.0, 5.0, 0.0)];
        let hit = nearest_exhaustive(&p(4.0, 0.0, 0.0), &targets).unwrap();
        assert_eq!(hit.position, p(0.0, 0.0, 0.0));
        assert_eq!(hit.examined, 3);
    }

    #[test]
    fn exhaustive_empty_yields_none() {
        assert!(nearest_exhaustive(&Point3::ZERO, &[]).is_none());
    }
}
