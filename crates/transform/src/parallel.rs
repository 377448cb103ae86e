//! Worker pool for the embarrassingly parallel loops.
//!
//! Row, column and plane passes in the lifting operators and the output bins
//! of the direct DFT are independent of one another. [`ParallelScheduler`]
//! fans them out over a dedicated rayon pool with recursive splitting, and
//! falls back to a plain loop once a partition holds `min_len` items or
//! fewer. Every task writes only its own outputs, so results are identical
//! to the sequential path for any thread count.

use rayon::prelude::*;
use tracing::debug;

use crate::error::TransformError;

/// Configuration for [`ParallelScheduler`].
///
/// # Example
///
/// ```
/// use pyramid_transform::SchedulerConfig;
///
/// let config = SchedulerConfig::new().with_threads(4).with_min_len(8);
/// assert_eq!(config.threads(), 4);
/// assert_eq!(config.min_len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    threads: usize,
    min_len: usize,
}

impl SchedulerConfig {
    /// Defaults: one thread per core, sequential below 4 items.
    pub fn new() -> Self {
        Self {
            threads: 0,
            min_len: 4,
        }
    }

    /// Sets the worker count; `0` means one per logical core.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the sequential-fallback threshold (at least 1).
    pub fn with_min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Returns the requested worker count.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Returns the sequential-fallback threshold.
    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A fixed-size worker pool with an explicit lifecycle.
///
/// The pool is created by [`ParallelScheduler::new`] and torn down by
/// [`ParallelScheduler::shutdown`] or by dropping the last handle. Nothing is
/// registered process-wide.
#[derive(Debug)]
pub struct ParallelScheduler {
    pool: rayon::ThreadPool,
    min_len: usize,
}

impl ParallelScheduler {
    /// Starts a pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::Scheduler`] if `min_len` is zero or the
    /// pool cannot be started.
    pub fn new(config: &SchedulerConfig) -> Result<Self, TransformError> {
        if config.min_len == 0 {
            return Err(TransformError::Scheduler(
                "min_len must be at least 1".to_owned(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("pyramid-worker-{i}"))
            .build()
            .map_err(|e| TransformError::Scheduler(e.to_string()))?;
        debug!(
            threads = pool.current_num_threads(),
            min_len = config.min_len,
            "scheduler started"
        );
        Ok(Self {
            pool,
            min_len: config.min_len,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Sequential-fallback threshold.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Applies `op` to every item, stopping at the first error.
    ///
    /// Items are split in halves with [`rayon::join`] until a half holds at
    /// most `min_len` items, which are then processed in order.
    pub fn try_for_each<T, E, F>(&self, items: &mut [T], op: F) -> Result<(), E>
    where
        T: Send,
        E: Send,
        F: Fn(&mut T) -> Result<(), E> + Sync,
    {
        self.pool.install(|| split_for_each(items, self.min_len, &op))
    }

    /// Evaluates `f(0), f(1), ..., f(n - 1)` on the pool, in index order.
    pub fn map_indices<R, F>(&self, n: usize, f: F) -> Vec<R>
    where
        R: Send,
        F: Fn(usize) -> R + Sync + Send,
    {
        let min_len = self.min_len;
        self.pool.install(|| (0..n).into_par_iter().with_min_len(min_len).map(f).collect())
    }

    /// Stops the pool. Queued work already handed to it completes first.
    pub fn shutdown(self) {
        debug!(threads = self.threads(), "scheduler shut down");
        drop(self.pool);
    }
}

fn split_for_each<T, E, F>(items: &mut [T], min_len: usize, op: &F) -> Result<(), E>
where
    T: Send,
    E: Send,
    F: Fn(&mut T) -> Result<(), E> + Sync,
{
    if items.len() <= min_len {
        return items.iter_mut().try_for_each(op);
    }
    let (left, right) = items.split_at_mut(items.len() / 2);
    let (l, r) = rayon::join(
        || split_for_each(left, min_len, op),
        || split_for_each(right, min_len, op),
    );
    l.and(r)
}
