//! # Dispatch Module - *Parallel Group Execution*
//!
//! Runs one unit of work per group across a rayon pool and reports each
//! finished group to the configured [`Progress`] hook.
//!
//! ## Behaviour
//! - Every group writes only into its own disjoint output slot, obtained by
//!   chunking the flat output buffer, so workers share nothing mutable.
//! - The global rayon pool is used unless [`MapOptions::num_threads`] asks
//!   for a dedicated pool for the duration of the call.
//! - Without the `parallel_proc` feature all work runs sequentially on the
//!   calling thread; results are identical.

use std::fmt;

use log::debug;
#[cfg(feature = "parallel_proc")]
use rayon::prelude::*;

use crate::enums::error::LexResult;
#[cfg(feature = "parallel_proc")]
use crate::enums::error::LexError;
use crate::progress::{LogProgress, Progress};

/// # MapOptions
///
/// Per-call configuration for the mapping operations.
///
/// ### Fields
/// - `progress`: caller-supplied completion hook.
/// - `desc`: description for a logged progress report. Used only when no
///   hook is supplied.
/// - `num_threads`: size of a dedicated pool for this call. `None` uses the
///   global pool.
/// - `verify_first`: re-check group 0 after the parallel pass. On by default.
///
/// ### Example
/// ```rust
/// use lexmap::{MapOptions, ProgressCounter};
///
/// let counter = ProgressCounter::new(16);
/// let opts = MapOptions::new().progress(&counter).num_threads(2);
/// assert!(opts.verify_first);
/// ```
#[derive(Clone)]
pub struct MapOptions<'p> {
    pub progress: Option<&'p dyn Progress>,
    pub desc: Option<String>,
    pub num_threads: Option<usize>,
    pub verify_first: bool,
}

impl<'p> MapOptions<'p> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports completed groups to `hook`.
    pub fn progress(mut self, hook: &'p dyn Progress) -> Self {
        self.progress = Some(hook);
        self
    }

    /// Logs progress under `desc` when no hook is supplied.
    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    /// Runs this call on a dedicated pool of `n` threads.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.num_threads = Some(n);
        self
    }

    pub fn verify_first(mut self, verify: bool) -> Self {
        self.verify_first = verify;
        self
    }
}

impl Default for MapOptions<'_> {
    fn default() -> Self {
        Self { progress: None, desc: None, num_threads: None, verify_first: true }
    }
}

impl fmt::Debug for MapOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapOptions")
            .field("progress", &self.progress.is_some())
            .field("desc", &self.desc)
            .field("num_threads", &self.num_threads)
            .field("verify_first", &self.verify_first)
            .finish()
    }
}

/// Runs `op` under the pool and progress hook selected by `opts`.
pub(crate) fn run<R, F>(opts: &MapOptions<'_>, n_groups: usize, op: F) -> LexResult<R>
where
    R: Send,
    F: FnOnce(Option<&dyn Progress>) -> R + Send,
{
    let logger;
    let progress: Option<&dyn Progress> = match (opts.progress, &opts.desc) {
        (Some(hook), _) => Some(hook),
        (None, Some(desc)) => {
            logger = LogProgress::new(desc.clone(), n_groups as u64);
            Some(&logger)
        }
        (None, None) => None,
    };

    #[cfg(feature = "parallel_proc")]
    if let Some(n) = opts.num_threads {
        debug!("dispatching {} groups on a dedicated pool of {} threads", n_groups, n);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| LexError::ThreadPool { message: e.to_string() })?;
        return Ok(pool.install(|| op(progress)));
    }

    #[cfg(not(feature = "parallel_proc"))]
    if opts.num_threads.is_some() {
        debug!("num_threads ignored: built without parallel_proc");
    }

    Ok(op(progress))
}

/// Calls `f` once for every group in `0..n_groups`.
pub(crate) fn for_each_group<F>(n_groups: usize, progress: Option<&dyn Progress>, f: F)
where
    F: Fn(usize) + Sync + Send,
{
    let visit = |g: usize| {
        f(g);
        if let Some(p) = progress {
            p.update(1);
        }
    };

    #[cfg(feature = "parallel_proc")]
    (0..n_groups).into_par_iter().for_each(visit);

    #[cfg(not(feature = "parallel_proc"))]
    (0..n_groups).for_each(visit);
}

/// Calls `f(g, slot)` for every `rec_len`-sized slot of `out`, stopping at
/// the first error. `rec_len` must be non-zero.
pub(crate) fn try_for_each_slot<E, F>(
    out: &mut [E],
    rec_len: usize,
    progress: Option<&dyn Progress>,
    f: F,
) -> LexResult<()>
where
    E: Send,
    F: Fn(usize, &mut [E]) -> LexResult<()> + Sync + Send,
{
    let visit = |(g, slot): (usize, &mut [E])| -> LexResult<()> {
        f(g, slot)?;
        if let Some(p) = progress {
            p.update(1);
        }
        Ok(())
    };

    #[cfg(feature = "parallel_proc")]
    return out.par_chunks_mut(rec_len).enumerate().try_for_each(visit);

    #[cfg(not(feature = "parallel_proc"))]
    out.chunks_mut(rec_len).enumerate().try_for_each(visit)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::enums::error::LexError;
    use crate::progress::ProgressCounter;

    #[test]
    fn test_for_each_group_visits_all() {
        let hits = AtomicUsize::new(0);
        let counter = ProgressCounter::new(50);
        for_each_group(50, Some(&counter), |g| {
            hits.fetch_add(g, Ordering::Relaxed);
        });
        assert_eq!(hits.load(Ordering::Relaxed), (0..50).sum::<usize>());
        assert_eq!(counter.count(), 50);
    }

    #[test]
    fn test_slots_are_disjoint() {
        let mut out = vec![0u32; 12];
        try_for_each_slot(&mut out, 3, None, |g, slot| {
            slot.fill(g as u32);
            Ok(())
        })
        .unwrap();
        assert_eq!(out, vec![0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_slot_error_propagates() {
        let mut out = vec![0u8; 8];
        let err = try_for_each_slot(&mut out, 1, None, |g, _| {
            if g == 5 { Err(LexError::ConsistencyViolation { group: g }) } else { Ok(()) }
        })
        .unwrap_err();
        assert_eq!(err, LexError::ConsistencyViolation { group: 5 });
    }

    #[test]
    fn test_run_with_dedicated_pool() {
        let opts = MapOptions::new().num_threads(2).desc("pool");
        let out = run(&opts, 4, |p| {
            assert!(p.is_some());
            7
        })
        .unwrap();
        assert_eq!(out, 7);
    }
}
