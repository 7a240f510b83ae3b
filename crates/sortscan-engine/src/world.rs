//! Per-step nearest-target world.
//!
//! [`NearestWorld`] is the primary user-facing API. Each call to
//! [`step()`](NearestWorld::step) copies the current seeker and target
//! positions into buffers allocated at construction, rebuilds the sorted
//! target index, runs the batch executor on the world's own rayon pool, and
//! returns the per-seeker results once every batch has joined.
//!
//! # Ownership model
//!
//! `NearestWorld` is [`Send`] (can be moved between threads). All mutating
//! methods take `&mut self`, and [`step()`](NearestWorld::step) returns a
//! [`StepResult`] that borrows from `self`. The caller therefore cannot
//! start the next step, which rewrites the buffers, while still holding the
//! previous step's results.
//!
//! # Cancellation
//!
//! [`cancel_token()`](NearestWorld::cancel_token) hands out a token that may
//! be cloned and triggered from any thread. The executor looks at it before
//! each batch; a step that skipped a batch fails with
//! [`StepError::Cancelled`], consumes the request, and leaves the world in
//! [`Phase::Idle`] with no readable results.

use std::time::Instant;

use rayon::{ThreadPool, ThreadPoolBuilder};
use sortscan_core::{BufferRole, Nearest, Point3, PositionSource, StepError, StepId};
use sortscan_index::{build_index_with, IndexOptions, SortedTargets};
use sortscan_query::{brute_force_into, query_nearest_cancellable, CancelToken};
use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::StepMetrics;
use crate::phase::Phase;

// Compile-time assertion: NearestWorld is Send.
// Fails to compile if any field is !Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<NearestWorld>();
    }
};

// ── StepResult ──────────────────────────────────────────────────

/// Result of a successful [`NearestWorld::step()`] call.
#[derive(Debug)]
pub struct StepResult<'w> {
    /// Step that produced these results (1 for the first step).
    pub step: StepId,
    /// `results[i]` is the nearest target to seeker `i`, or `None` when
    /// there are no targets.
    pub results: &'w [Nearest],
    /// Performance metrics for this step.
    pub metrics: StepMetrics,
}

// ── NearestWorld ────────────────────────────────────────────────

/// Nearest-target engine with persistent buffers and a dedicated worker
/// pool.
///
/// # Example
///
/// ```
/// use sortscan_core::Point3;
/// use sortscan_engine::{EngineConfig, NearestWorld};
///
/// let mut world = NearestWorld::new(EngineConfig::with_counts(1, 3)).unwrap();
/// let seekers = vec![Point3::new(4.0, 0.0, 0.0)];
/// let targets = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(5.0, 5.0, 0.0),
/// ];
/// let result = world.step(&seekers, &targets).unwrap();
/// assert_eq!(result.results, &[Some(Point3::new(0.0, 0.0, 0.0))]);
/// ```
pub struct NearestWorld {
    config: EngineConfig,
    pool: ThreadPool,
    seekers: Vec<Point3>,
    targets: Vec<Point3>,
    results: Vec<Nearest>,
    phase: Phase,
    /// Whether `targets` currently holds a sorted index for `config.axis`.
    indexed: bool,
    current_step: StepId,
    cancel: CancelToken,
    last_metrics: StepMetrics,
}

impl NearestWorld {
    /// Create a new world from an [`EngineConfig`].
    ///
    /// Validates the configuration, spawns the worker pool, and allocates
    /// the seeker, target, and result buffers at their final sizes.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let workers = config.resolved_worker_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sortscan-worker-{i}"))
            .build()
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        info!(
            seekers = config.seeker_count,
            targets = config.target_count,
            workers,
            batch_size = config.batch_size,
            axis = %config.axis,
            strategy = %config.strategy,
            "nearest world built"
        );

        Ok(Self {
            seekers: vec![Point3::ZERO; config.seeker_count],
            targets: vec![Point3::ZERO; config.target_count],
            results: vec![None; config.seeker_count],
            pool,
            config,
            phase: Phase::Idle,
            indexed: false,
            current_step: StepId::default(),
            cancel: CancelToken::new(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run one step.
    ///
    /// Both sources must supply exactly the configured number of positions;
    /// this is checked before either is read. The step then loads the
    /// buffers, sorts the targets (`Sorting`), runs the executor
    /// (`Searching`), and joins (`Done`).
    ///
    /// # Errors
    ///
    /// - [`StepError::InputLength`] if a source has the wrong length. No
    ///   position is read and the previous step's results are discarded.
    /// - [`StepError::Cancelled`] if a cancellation request was observed
    ///   before some batch. The step counter does not advance.
    pub fn step<S, T>(&mut self, seekers: &S, targets: &T) -> Result<StepResult<'_>, StepError>
    where
        S: PositionSource + ?Sized,
        T: PositionSource + ?Sized,
    {
        let step_start = Instant::now();
        self.enter(Phase::Idle);
        self.indexed = false;
        check_len(BufferRole::Seekers, self.config.seeker_count, seekers.len())?;
        check_len(BufferRole::Targets, self.config.target_count, targets.len())?;

        // Load.
        let load_start = Instant::now();
        seekers.fill(&mut self.seekers);
        targets.fill(&mut self.targets);
        let load_us = load_start.elapsed().as_micros() as u64;

        // Sort.
        self.enter(Phase::Sorting);
        let sort_start = Instant::now();
        let strategy = self.config.strategy;
        let batch_size = self.config.batch_size;
        let pool = &self.pool;
        let cancel = &self.cancel;
        let seeker_buf = self.seekers.as_slice();
        let result_buf = self.results.as_mut_slice();
        let sorted = if strategy.needs_index() {
            let options = IndexOptions {
                axis: self.config.axis,
                parallel_threshold: self.config.parallel_sort_threshold,
            };
            let target_buf = self.targets.as_mut_slice();
            Some(pool.install(move || build_index_with(target_buf, options)))
        } else {
            None
        };
        let sort_us = sort_start.elapsed().as_micros() as u64;

        // Search.
        // `enter` would need all of `self` while the buffers are lent out.
        trace!(step = %self.current_step.next(), from = %self.phase, to = %Phase::Searching, "phase");
        self.phase = Phase::Searching;
        let query_start = Instant::now();
        let outcome = match sorted {
            Some(sorted) => pool.install(move || {
                query_nearest_cancellable(seeker_buf, sorted, result_buf, batch_size, cancel)
            }),
            None => {
                let target_buf = self.targets.as_slice();
                pool.install(move || {
                    brute_force_into(seeker_buf, target_buf, result_buf, batch_size, Some(cancel))
                })
            }
        };
        let query_us = query_start.elapsed().as_micros() as u64;

        let report = match outcome {
            Ok(report) => report,
            Err(e) => {
                self.enter(Phase::Idle);
                return Err(e.into());
            }
        };
        if !report.is_complete() {
            self.cancel.take();
            self.enter(Phase::Idle);
            warn!(
                step = %self.current_step.next(),
                completed_batches = report.completed_batches,
                batches = report.batches,
                "step cancelled"
            );
            return Err(StepError::Cancelled {
                completed_batches: report.completed_batches,
                batches: report.batches,
            });
        }

        self.indexed = strategy.needs_index();
        self.current_step = self.current_step.next();
        self.enter(Phase::Done);
        self.last_metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            load_us,
            sort_us,
            query_us,
            batches: report.batches,
            candidates_examined: report.candidates_examined,
        };
        debug!(
            step = %self.current_step,
            total_us = self.last_metrics.total_us,
            sort_us,
            query_us,
            batches = report.batches,
            candidates_examined = report.candidates_examined,
            "step complete"
        );

        Ok(StepResult {
            step: self.current_step,
            results: &self.results,
            metrics: self.last_metrics,
        })
    }

    /// Results of the last step, or `None` unless the world is in
    /// [`Phase::Done`].
    pub fn results(&self) -> Option<&[Nearest]> {
        self.phase.has_results().then_some(self.results.as_slice())
    }

    /// The sorted target index built by the last step.
    ///
    /// `None` before the first step, after a failed or cancelled step, and
    /// under [`Strategy::BruteForce`](sortscan_query::Strategy::BruteForce), which never sorts.
    pub fn sorted_targets(&self) -> Option<SortedTargets<'_>> {
        if !self.indexed {
            return None;
        }
        SortedTargets::verify(&self.targets, self.config.axis)
    }

    /// Seeker positions loaded by the last step.
    pub fn seekers(&self) -> &[Point3] {
        &self.seekers
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last successfully completed step (0 before the first step or after
    /// [`reset()`](Self::reset)).
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Token that cancels the in-flight or next step. Clone it to hand it
    /// to another thread.
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// The configuration this world was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Return to step 0.
    ///
    /// Drops any readable results, clears metrics, and consumes a pending
    /// cancellation request. Buffers and the worker pool are kept.
    pub fn reset(&mut self) {
        self.enter(Phase::Idle);
        self.indexed = false;
        self.current_step = StepId::default();
        self.last_metrics = StepMetrics::default();
        self.cancel.take();
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            trace!(step = %self.current_step.next(), from = %self.phase, to = %phase, "phase");
            self.phase = phase;
        }
    }
}

fn check_len(buffer: BufferRole, expected: usize, actual: usize) -> Result<(), StepError> {
    if expected == actual {
        Ok(())
    } else {
        Err(StepError::InputLength {
            buffer,
            expected,
            actual,
        })
    }
}

impl std::fmt::Debug for NearestWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NearestWorld")
            .field("current_step", &self.current_step)
            .field("phase", &self.phase)
            .field("seekers", &self.seekers.len())
            .field("targets", &self.targets.len())
            .field("strategy", &self.config.strategy)
            .field("workers", &self.pool.current_num_threads())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscan_core::Axis;
    use sortscan_index::is_sorted_along;
    use sortscan_query::Strategy;
    use sortscan_test_utils::{assert_matches_brute_force, scatter_cube, CountingSource};

    fn p(x: f32, y: f32, z: f32) -> Point3 {
        Point3::new(x, y, z)
    }

    fn concrete_targets() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(10.0, 0.0, 0.0), p(5.0, 5.0, 0.0)]
    }

    fn small_config(seekers: usize, targets: usize) -> EngineConfig {
        EngineConfig {
            worker_count: Some(2),
            ..EngineConfig::with_counts(seekers, targets)
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let cfg = EngineConfig {
            batch_size: 0,
            ..small_config(1, 1)
        };
        match NearestWorld::new(cfg) {
            Err(ConfigError::ZeroBatchSize) => {}
            other => panic!("expected ZeroBatchSize, got {other:?}"),
        }
    }

    #[test]
    fn fresh_world_is_idle_at_step_zero() {
        let world = NearestWorld::new(small_config(4, 4)).unwrap();
        assert_eq!(world.phase(), Phase::Idle);
        assert_eq!(world.current_step(), StepId(0));
        assert!(world.results().is_none());
        assert!(world.sorted_targets().is_none());
        assert_eq!(world.last_metrics(), &StepMetrics::default());
    }

    #[test]
    fn concrete_scenario_step() {
        let mut world = NearestWorld::new(small_config(1, 3)).unwrap();
        let result = world.step(&[p(4.0, 0.0, 0.0)][..], &concrete_targets()).unwrap();
        assert_eq!(result.step, StepId(1));
        assert_eq!(result.results, &[Some(p(0.0, 0.0, 0.0))]);
        assert_eq!(result.metrics.batches, 1);
        assert_eq!(result.metrics.candidates_examined, 2);
        assert_eq!(world.phase(), Phase::Done);
    }

    #[test]
    fn step_leaves_sorted_index_readable() {
        let targets = scatter_cube(3, 300, 10.0);
        let seekers = scatter_cube(4, 50, 10.0);
        let mut world = NearestWorld::new(small_config(50, 300)).unwrap();
        world.step(&seekers, &targets).unwrap();

        let sorted = world.sorted_targets().unwrap();
        assert_eq!(sorted.len(), 300);
        assert_eq!(sorted.axis(), Axis::X);
        assert!(is_sorted_along(sorted.as_slice(), Axis::X));
        assert_eq!(world.seekers(), seekers.as_slice());
        assert_matches_brute_force(&seekers, &targets, world.results().unwrap());
    }

    #[test]
    fn empty_targets_give_absent_results() {
        let mut world = NearestWorld::new(small_config(5, 0)).unwrap();
        let seekers = vec![p(1.0, 2.0, 3.0); 5];
        let result = world.step(&seekers, &Vec::<Point3>::new()).unwrap();
        assert!(result.results.iter().all(Option::is_none));
        assert_eq!(result.metrics.candidates_examined, 0);
    }

    #[test]
    fn wrong_seeker_count_fails_before_reading() {
        let mut world = NearestWorld::new(small_config(3, 3)).unwrap();
        let seekers = CountingSource::new(vec![Point3::ZERO; 2]);
        let targets = CountingSource::new(concrete_targets());
        match world.step(&seekers, &targets) {
            Err(StepError::InputLength {
                buffer: BufferRole::Seekers,
                expected: 3,
                actual: 2,
            }) => {}
            other => panic!("expected InputLength(Seekers), got {other:?}"),
        }
        assert_eq!(seekers.fill_count(), 0);
        assert_eq!(targets.fill_count(), 0);
        assert_eq!(world.current_step(), StepId(0));
        assert_eq!(world.phase(), Phase::Idle);
    }

    #[test]
    fn wrong_target_count_discards_previous_results() {
        let mut world = NearestWorld::new(small_config(1, 3)).unwrap();
        world.step(&vec![p(4.0, 0.0, 0.0)], &concrete_targets()).unwrap();
        assert!(world.results().is_some());

        match world.step(&vec![p(4.0, 0.0, 0.0)], &vec![Point3::ZERO; 4]) {
            Err(StepError::InputLength {
                buffer: BufferRole::Targets,
                expected: 3,
                actual: 4,
            }) => {}
            other => panic!("expected InputLength(Targets), got {other:?}"),
        }
        assert!(world.results().is_none());
        assert_eq!(world.current_step(), StepId(1));
    }

    #[test]
    fn pre_cancelled_step_fails_then_next_succeeds() {
        let mut world = NearestWorld::new(small_config(10, 3)).unwrap();
        let seekers = vec![p(4.0, 0.0, 0.0); 10];
        world.cancel_token().clone().cancel();

        match world.step(&seekers, &concrete_targets()) {
            Err(StepError::Cancelled {
                completed_batches: 0,
                batches: 1,
            }) => {}
            other => panic!("expected Cancelled, got {other:?}"),
        }
        assert_eq!(world.phase(), Phase::Idle);
        assert!(world.results().is_none());
        assert!(world.sorted_targets().is_none());
        assert_eq!(world.current_step(), StepId(0));
        assert!(!world.cancel_token().is_cancelled());

        let result = world.step(&seekers, &concrete_targets()).unwrap();
        assert_eq!(result.step, StepId(1));
        assert!(result.results.iter().all(|r| *r == Some(p(0.0, 0.0, 0.0))));
    }

    #[test]
    fn brute_force_strategy_skips_index() {
        let cfg = EngineConfig {
            strategy: Strategy::BruteForce,
            ..small_config(1, 3)
        };
        let mut world = NearestWorld::new(cfg).unwrap();
        let result = world.step(&vec![p(4.0, 0.0, 0.0)], &concrete_targets()).unwrap();
        assert_eq!(result.results, &[Some(p(0.0, 0.0, 0.0))]);
        assert_eq!(result.metrics.candidates_examined, 3);
        assert!(world.sorted_targets().is_none());
        assert_eq!(world.phase(), Phase::Done);
    }

    #[test]
    fn reset_returns_to_step_zero() {
        let mut world = NearestWorld::new(small_config(1, 3)).unwrap();
        world.step(&vec![p(4.0, 0.0, 0.0)], &concrete_targets()).unwrap();
        world.cancel_token().cancel();
        world.reset();
        assert_eq!(world.current_step(), StepId(0));
        assert_eq!(world.phase(), Phase::Idle);
        assert!(world.results().is_none());
        assert!(!world.cancel_token().is_cancelled());
        assert_eq!(world.last_metrics(), &StepMetrics::default());
    }

    #[test]
    fn step_counter_advances_per_success() {
        let mut world = NearestWorld::new(small_config(1, 3)).unwrap();
        for expected in 1..=5 {
            let result = world.step(&vec![p(4.0, 0.0, 0.0)], &concrete_targets()).unwrap();
            assert_eq!(result.step, StepId(expected));
        }
        assert_eq!(world.current_step(), StepId(5));
    }

    #[test]
    fn debug_does_not_dump_buffers() {
        let world = NearestWorld::new(small_config(2, 2)).unwrap();
        let s = format!("{world:?}");
        assert!(s.contains("NearestWorld"));
        assert!(s.contains("workers: 2"));
    }
}
