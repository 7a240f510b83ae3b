//! Cooperative cancellation at batch-dispatch boundaries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks an in-flight query to stop dispatching batches.
///
/// Clones share the same flag, so one clone can be handed to another
/// thread while the owner keeps running steps. The executor checks the flag
/// once per batch, before the batch starts; a batch that has started always
/// runs to completion. A query that skipped any batch reports itself
/// incomplete and its results must not be used.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token with no cancellation requested.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested and not yet consumed.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Consume a pending request, returning whether there was one.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::AcqRel)
    }
}
