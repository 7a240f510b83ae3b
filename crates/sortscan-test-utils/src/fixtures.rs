//! Deterministic point sets and position sources.
//!
//! - [`scatter_plane`]: points on the XZ plane (y = 0) inside a rectangle,
//!   the layout of the seekers-and-targets demo scene.
//! - [`scatter_cube`]: points spread through a cube, for 3-D coverage.
//! - [`Drifters`]: points moving at constant velocity, advanced by the
//!   caller between steps.
//! - [`CountingSource`]: a fixed point set that records how often the
//!   engine reads it.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sortscan_core::{Point3, PositionSource};

/// `n` points uniformly placed in `[0, width) × {0} × [0, depth)`.
///
/// Identical seeds produce identical point sets.
///
/// # Panics
///
/// Panics if `width` or `depth` is not positive.
pub fn scatter_plane(seed: u64, n: usize, width: f32, depth: f32) -> Vec<Point3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point3::new(rng.random_range(0.0..width), 0.0, rng.random_range(0.0..depth)))
        .collect()
}

/// `n` points uniformly placed in the cube `[-half, half)³`.
///
/// # Panics
///
/// Panics if `half` is not positive.
pub fn scatter_cube(seed: u64, n: usize, half: f32) -> Vec<Point3> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Point3::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            )
        })
        .collect()
}

/// A direction drawn uniformly from the unit disc on the XZ plane.
fn unit_disc_xz(rng: &mut ChaCha8Rng) -> Point3 {
    loop {
        let x: f32 = rng.random_range(-1.0..1.0);
        let z: f32 = rng.random_range(-1.0..1.0);
        if x * x + z * z <= 1.0 {
            return Point3::new(x, 0.0, z);
        }
    }
}

/// Points moving at constant velocity on the XZ plane.
///
/// Stands in for the entity storage that owns positions in a real caller:
/// the engine only sees it through [`PositionSource`].
#[derive(Clone, Debug)]
pub struct Drifters {
    positions: Vec<Point3>,
    velocities: Vec<Point3>,
}

impl Drifters {
    /// `n` drifters scattered over `width × depth`, each with a velocity
    /// drawn from the unit disc.
    pub fn scatter(seed: u64, n: usize, width: f32, depth: f32) -> Self {
        let positions = scatter_plane(seed, n, width, depth);
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
        let velocities = (0..n).map(|_| unit_disc_xz(&mut rng)).collect();
        Self {
            positions,
            velocities,
        }
    }

    /// Move every drifter by `velocity * dt`.
    pub fn advance(&mut self, dt: f32) {
        for (p, v) in self.positions.iter_mut().zip(&self.velocities) {
            *p = *p + *v * dt;
        }
    }

    /// Current positions.
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }
}

impl PositionSource for Drifters {
    fn len(&self) -> usize {
        self.positions.len()
    }

    fn fill(&self, out: &mut [Point3]) {
        out.copy_from_slice(&self.positions);
    }
}

/// A fixed point set that counts [`PositionSource::fill`] calls.
#[derive(Debug, Default)]
pub struct CountingSource {
    points: Vec<Point3>,
    fills: AtomicUsize,
}

impl CountingSource {
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            fills: AtomicUsize::new(0),
        }
    }

    /// Number of times the engine has copied positions out of this source.
    pub fn fill_count(&self) -> usize {
        self.fills.load(Ordering::Relaxed)
    }
}

impl PositionSource for CountingSource {
    fn len(&self) -> usize {
        self.points.len()
    }

    fn fill(&self, out: &mut [Point3]) {
        self.fills.fetch_add(1, Ordering::Relaxed);
        out.copy_from_slice(&self.points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_is_deterministic() {
        assert_eq!(scatter_plane(7, 50, 10.0, 10.0), scatter_plane(7, 50, 10.0, 10.0));
        assert_ne!(scatter_plane(7, 50, 10.0, 10.0), scatter_plane(8, 50, 10.0, 10.0));
    }

    #[test]
    fn scatter_plane_stays_in_bounds() {
        for p in scatter_plane(3, 500, 20.0, 5.0) {
            assert!((0.0..20.0).contains(&p.x));
            assert_eq!(p.y, 0.0);
            assert!((0.0..5.0).contains(&p.z));
        }
    }

    #[test]
    fn scatter_cube_stays_in_bounds() {
        for p in scatter_cube(3, 500, 4.0) {
            for c in [p.x, p.y, p.z] {
                assert!((-4.0..4.0).contains(&c));
            }
        }
    }

    #[test]
    fn drifters_move_at_most_dt_per_step() {
        let mut d = Drifters::scatter(11, 100, 50.0, 50.0);
        let before = d.positions().to_vec();
        d.advance(0.5);
        for (a, b) in before.iter().zip(d.positions()) {
            assert!(a.distance_sq(b) <= 0.25 + 1e-5);
            assert_eq!(b.y, 0.0);
        }
    }

    #[test]
    fn counting_source_counts_fills() {
        let src = CountingSource::new(vec![Point3::ZERO; 3]);
        let mut out = [Point3::new(1.0, 1.0, 1.0); 3];
        src.fill(&mut out);
        src.fill(&mut out);
        assert_eq!(src.fill_count(), 2);
        assert_eq!(out, [Point3::ZERO; 3]);
    }
}
