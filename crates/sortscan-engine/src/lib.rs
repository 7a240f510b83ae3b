//! Per-step nearest-target engine for sortscan.
//!
//! Provides [`NearestWorld`], which owns the seeker, target, and result
//! buffers and a dedicated worker pool, and runs one sort-then-search step
//! per call: targets are sorted along the configured axis, then every
//! seeker's nearest target is found in parallel batches, and the call
//! returns after the batches have joined.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod phase;
pub mod world;

pub use config::{ConfigError, EngineConfig};
pub use metrics::StepMetrics;
pub use phase::Phase;
pub use world::{NearestWorld, StepResult};
