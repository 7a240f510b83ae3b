//! Core types and traits for the sortscan nearest-target engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the sortscan workspace:
//! positions and axes, step IDs, error types, and the position source
//! trait that collaborators implement to feed the engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod point;
pub mod traits;

pub use error::{BufferRole, QueryError, StepError};
pub use id::StepId;
pub use point::{Axis, Nearest, Point3};
pub use traits::PositionSource;
