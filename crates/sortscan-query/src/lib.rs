//! Parallel sort-pruned nearest-target executor.
//!
//! For every seeker, [`nearest_sorted`] binary-searches the sorted target
//! index for the seeker's insertion point along the index axis, then scans
//! outward in both directions, stopping each direction as soon as the axis
//! gap alone exceeds the best squared distance found so far. The batch
//! executor ([`query_nearest_into`] and friends) runs that kernel over
//! contiguous batches of seekers on the rayon pool; each batch owns a
//! disjoint `&mut` chunk of the result buffer, so no locking is involved.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod executor;
pub mod search;
pub mod strategy;

pub use cancel::CancelToken;
pub use executor::{
    brute_force_into, query_nearest, query_nearest_cancellable, query_nearest_into, QueryReport,
};
pub use search::{lower_bound, nearest_exhaustive, nearest_sorted, Hit};
pub use strategy::Strategy;
