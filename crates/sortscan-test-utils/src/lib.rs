//! Test fixtures and reference oracles for sortscan development.
//!
//! Provides deterministic point generators ([`scatter_plane`],
//! [`scatter_cube`]), a moving population ([`Drifters`]) that stands in for
//! the entity storage a real caller would own, a [`CountingSource`] mock,
//! and the exhaustive oracle ([`check_against_brute_force`]) every
//! correctness test compares the engine with.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod oracle;

pub use fixtures::{scatter_cube, scatter_plane, CountingSource, Drifters};
pub use oracle::{assert_matches_brute_force, check_against_brute_force, min_distance_sq};
