//! Sortscan: sort-pruned parallel nearest-target search for moving point sets.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! sortscan sub-crates. For most users, adding `sortscan` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use sortscan::prelude::*;
//!
//! // One-off query: sort the targets, then search.
//! let mut targets = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(10.0, 0.0, 0.0),
//!     Point3::new(5.0, 5.0, 0.0),
//! ];
//! let seekers = [Point3::new(4.0, 0.0, 0.0)];
//! let sorted = build_index(&mut targets);
//! let nearest = query_nearest(&seekers, sorted, 100).unwrap();
//! assert_eq!(nearest, vec![Some(Point3::new(0.0, 0.0, 0.0))]);
//!
//! // Per-frame driver with persistent buffers and its own worker pool.
//! let mut world = NearestWorld::new(EngineConfig::with_counts(1, 3)).unwrap();
//! let result = world.step(&seekers[..], &targets).unwrap();
//! assert_eq!(result.step, sortscan::types::StepId(1));
//! assert_eq!(result.results, &[Some(Point3::new(0.0, 0.0, 0.0))]);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sortscan-core` | Points, axes, step IDs, errors, `PositionSource` |
//! | [`index`] | `sortscan-index` | Axis sort and the `SortedTargets` view |
//! | [`query`] | `sortscan-query` | Search kernels, batch executor, cancellation |
//! | [`engine`] | `sortscan-engine` | `NearestWorld`, configuration, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`sortscan-core`).
///
/// Contains [`types::Point3`], [`types::Axis`], the error enums, and the
/// [`types::PositionSource`] trait collaborators implement to feed a world.
pub use sortscan_core as types;

/// Target index builder (`sortscan-index`).
///
/// [`index::build_index`] sorts targets in place and returns the
/// [`index::SortedTargets`] view that every pruned query requires.
pub use sortscan_index as index;

/// Nearest-target search (`sortscan-query`).
///
/// Single-seeker kernels ([`query::nearest_sorted`],
/// [`query::nearest_exhaustive`]) and the parallel batch executor
/// ([`query::query_nearest`] and friends).
pub use sortscan_query as query;

/// Per-step engine (`sortscan-engine`).
///
/// [`engine::NearestWorld`] owns the buffers and worker pool and runs one
/// sort-then-search step per call.
pub use sortscan_engine as engine;

/// Common imports for typical sortscan usage.
///
/// ```rust
/// use sortscan::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use sortscan_core::{Axis, Nearest, Point3, PositionSource};

    // Errors
    pub use sortscan_core::{QueryError, StepError};

    // Index
    pub use sortscan_index::{build_index, SortedTargets};

    // Query
    pub use sortscan_query::{query_nearest, CancelToken, Strategy};

    // Engine
    pub use sortscan_engine::{
        ConfigError, EngineConfig, NearestWorld, Phase, StepMetrics, StepResult,
    };
}
