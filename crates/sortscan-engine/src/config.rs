//! Engine configuration, validation, and error types.
//!
//! [`EngineConfig`] is the builder-input for [`NearestWorld`](crate::NearestWorld).
//! [`validate()`](EngineConfig::validate) checks structural invariants at
//! startup; the world constructor calls it before allocating anything.

use std::error::Error;
use std::fmt;

use sortscan_core::Axis;
use sortscan_query::Strategy;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building a [`NearestWorld`](crate::NearestWorld).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `batch_size` is zero.
    ZeroBatchSize,
    /// `parallel_sort_threshold` is zero.
    InvalidParallelThreshold {
        /// The invalid value.
        value: usize,
    },
    /// The worker pool could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBatchSize => write!(f, "batch_size must be at least 1"),
            Self::InvalidParallelThreshold { value } => {
                write!(f, "parallel_sort_threshold must be at least 1, got {value}")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

// ── EngineConfig ───────────────────────────────────────────────────

/// Complete configuration for constructing a [`NearestWorld`](crate::NearestWorld).
///
/// Seeker and target counts are fixed for the lifetime of the world: the
/// buffers are allocated once at construction and every step must supply
/// exactly this many positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of seekers supplied each step.
    pub seeker_count: usize,
    /// Number of targets supplied each step.
    pub target_count: usize,
    /// Seekers per executor batch. Affects scheduling only. Default: 100.
    pub batch_size: usize,
    /// Axis the target index is sorted along. Default: X.
    pub axis: Axis,
    /// Nearest-target search strategy. Default: sort-pruned.
    pub strategy: Strategy,
    /// Worker threads in the engine's pool. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub worker_count: Option<usize>,
    /// Target count at or above which the index is sorted in parallel.
    /// Default: 4096. Use `usize::MAX` to always sort sequentially.
    pub parallel_sort_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seeker_count: 0,
            target_count: 0,
            batch_size: 100,
            axis: Axis::X,
            strategy: Strategy::SortPruned,
            worker_count: None,
            parallel_sort_threshold: 4096,
        }
    }
}

impl EngineConfig {
    /// Configuration for `seekers` seekers and `targets` targets, with every
    /// other setting at its default.
    pub fn with_counts(seekers: usize, targets: usize) -> Self {
        Self {
            seeker_count: seekers,
            target_count: targets,
            ..Self::default()
        }
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        if self.parallel_sort_threshold == 0 {
            return Err(ConfigError::InvalidParallelThreshold {
                value: self.parallel_sort_threshold,
            });
        }
        Ok(())
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, 64),
        }
    }

    /// Number of executor batches one step is split into.
    pub fn batches_per_step(&self) -> usize {
        self.seeker_count.div_ceil(self.batch_size.max(1))
    }
}
