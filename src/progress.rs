//! # Progress Module - *Per-Group Completion Reporting*
//!
//! Workers report every finished group through a shared [`Progress`] hook.
//! Reporting is advisory only: a hook never influences results, and a
//! reporter that cannot keep up only affects what is displayed.
//!
//! ## Provided hooks
//! - [`ProgressCounter`]: lock-free completion count, for callers that poll.
//! - [`LogProgress`]: emits an `info!` record at every completed tenth,
//!   used when a mapping call is given a description but no hook.

use std::sync::atomic::{AtomicU64, Ordering};

use log::info;

/// Receives completed-group counts from concurrent workers.
pub trait Progress: Sync {
    /// `n` more groups have finished.
    fn update(&self, n: u64);
}

/// Atomic completion counter.
#[derive(Debug, Default)]
pub struct ProgressCounter {
    done: AtomicU64,
    total: u64,
}

impl ProgressCounter {
    /// Counter expecting `total` groups.
    pub fn new(total: u64) -> Self {
        Self { done: AtomicU64::new(0), total }
    }

    /// Groups completed so far.
    #[inline]
    pub fn count(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// `true` once at least `total` groups were reported.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.count() >= self.total
    }
}

impl Progress for ProgressCounter {
    #[inline]
    fn update(&self, n: u64) {
        self.done.fetch_add(n, Ordering::Relaxed);
    }
}

/// Logs progress under a description at every completed tenth of `total`.
#[derive(Debug)]
pub struct LogProgress {
    desc: String,
    total: u64,
    done: AtomicU64,
}

impl LogProgress {
    pub fn new(desc: impl Into<String>, total: u64) -> Self {
        Self { desc: desc.into(), total, done: AtomicU64::new(0) }
    }

    #[inline]
    pub fn desc(&self) -> &str {
        &self.desc
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    /// Tenth of `total` reached after `done` groups, `10` when complete.
    #[inline]
    fn decile(&self, done: u64) -> u64 {
        if self.total == 0 {
            return 10;
        }
        (done.min(self.total) * 10) / self.total
    }
}

impl Progress for LogProgress {
    fn update(&self, n: u64) {
        let before = self.done.fetch_add(n, Ordering::Relaxed);
        let after = before + n;
        let (from, to) = (self.decile(before), self.decile(after));
        if to > from {
            info!("{}: {}/{} groups ({}%)", self.desc, after.min(self.total), self.total, to * 10);
        }
    }
}
