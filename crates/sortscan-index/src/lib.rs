//! One-axis sorted target index.
//!
//! The index is rebuilt from scratch every step: [`build_index`] sorts the
//! target buffer in place along one axis (X by default) and hands back a
//! [`SortedTargets`] view. That view is the only way into the nearest-target
//! executor, so a query can never run against an unsorted or
//! still-being-sorted buffer.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod order;
pub mod sorted;

pub use builder::{build_index, build_index_with, IndexOptions};
pub use order::{axis_order, is_sorted_along};
pub use sorted::SortedTargets;
