//! Exhaustive reference oracle.
//!
//! Results are verified by distance, not identity: any target at the
//! minimal squared distance is an acceptable answer.

use sortscan_core::{Nearest, Point3};

/// Minimal squared distance from `seeker` to any of `targets`, or `None`
/// when there are no targets. O(M).
pub fn min_distance_sq(seeker: &Point3, targets: &[Point3]) -> Option<f32> {
    targets
        .iter()
        .map(|t| seeker.distance_sq(t))
        .reduce(f32::min)
}

/// Check every result against an exhaustive O(N×M) search.
///
/// For each seeker `i`:
/// - if `targets` is empty, `results[i]` must be `None`;
/// - otherwise `results[i]` must be one of `targets` (bitwise) and lie at
///   the minimal squared distance.
///
/// `targets` may be in any order. Returns a description of the first
/// violation, so it can be used from `proptest` bodies.
pub fn check_against_brute_force(
    seekers: &[Point3],
    targets: &[Point3],
    results: &[Nearest],
) -> Result<(), String> {
    if results.len() != seekers.len() {
        return Err(format!(
            "{} results for {} seekers",
            results.len(),
            seekers.len()
        ));
    }
    for (i, (seeker, result)) in seekers.iter().zip(results).enumerate() {
        match (min_distance_sq(seeker, targets), result) {
            (None, None) => {}
            (None, Some(p)) => {
                return Err(format!("seeker {i}: expected absent, got {p}"));
            }
            (Some(_), None) => {
                return Err(format!("seeker {i}: expected a target, got absent"));
            }
            (Some(best), Some(p)) => {
                if !targets.iter().any(|t| same_bits(t, p)) {
                    return Err(format!("seeker {i}: {p} is not one of the targets"));
                }
                let got = seeker.distance_sq(p);
                if got != best {
                    return Err(format!(
                        "seeker {i} at {seeker}: got {p} at distance_sq {got}, minimum is {best}"
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Panicking form of [`check_against_brute_force`].
///
/// # Panics
///
/// Panics with the first violation found.
pub fn assert_matches_brute_force(seekers: &[Point3], targets: &[Point3], results: &[Nearest]) {
    if let Err(msg) = check_against_brute_force(seekers, targets, results) {
        panic!("{msg}");
    }
}

fn same_bits(a: &Point3, b: &Point3) -> bool {
    a.x.to_bits() == b.x.to_bits() && a.y.to_bits() == b.y.to_bits() && a.z.to_bits() == b.z.to_bits()
}
