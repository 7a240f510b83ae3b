//! Benchmark profiles and scenes for the sortscan nearest-target engine.
//!
//! Provides pre-built [`EngineConfig`] profiles and matching point sets:
//!
//! - [`reference_profile`]: 1K seekers × 1K targets on a 500×500 plane
//! - [`stress_profile`]: 10K seekers × 10K targets on a 1580×1580 plane
//!   (same density)
//! - [`scene`]: deterministic seekers and targets for a profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use sortscan_core::Point3;
use sortscan_engine::EngineConfig;
use sortscan_query::Strategy;
use sortscan_test_utils::scatter_plane;

/// Side length of the reference plane.
pub const REFERENCE_EXTENT: f32 = 500.0;

/// Side length of the stress plane; keeps the reference density at 10×
/// the entity count.
pub const STRESS_EXTENT: f32 = 1580.0;

/// 1 000 seekers and 1 000 targets, sort-pruned, default batching.
pub fn reference_profile(strategy: Strategy) -> EngineConfig {
    EngineConfig {
        strategy,
        ..EngineConfig::with_counts(1_000, 1_000)
    }
}

/// 10 000 seekers and 10 000 targets.
pub fn stress_profile(strategy: Strategy) -> EngineConfig {
    EngineConfig {
        strategy,
        ..EngineConfig::with_counts(10_000, 10_000)
    }
}

/// Deterministic `(seekers, targets)` sized for `config`, scattered over an
/// `extent × extent` plane.
pub fn scene(config: &EngineConfig, extent: f32, seed: u64) -> (Vec<Point3>, Vec<Point3>) {
    let seekers = scatter_plane(seed, config.seeker_count, extent, extent);
    let targets = scatter_plane(seed.wrapping_add(1), config.target_count, extent, extent);
    (seekers, targets)
}
