use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Point-in-time view of batch progress.
///
/// Best-effort observability: the estimate is derived from the average time
/// per completed request and gets less volatile as the batch progresses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub active: usize,
    pub remaining: usize,
    pub estimated_secs_remaining: f64,
}

/// Shared counters behind the progress reports.
///
/// Relaxed ordering throughout: the counters feed log lines and snapshots
/// only; batch completion is established by joining the worker pool, not by
/// observing `completed`.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    total: AtomicUsize,
    completed: AtomicUsize,
    active: AtomicUsize,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new() -> Self {
        Self {
            total: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    /// Set once at batch registration, before any worker starts.
    pub(crate) fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn start_request(&self) {
        self.active.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn complete_request(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.active.fetch_sub(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> ProgressSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let completed = self.completed.load(Ordering::Relaxed);
        let active = self.active.load(Ordering::Relaxed);

        let remaining = total.saturating_sub(completed);
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let avg_time_per_request = if completed > 0 {
            elapsed / completed as f64
        } else {
            0.0
        };
        let estimated_secs_remaining = if avg_time_per_request > 0.0 {
            remaining as f64 * avg_time_per_request
        } else {
            0.0
        };

        ProgressSnapshot {
            completed,
            total,
            active,
            remaining,
            estimated_secs_remaining,
        }
    }

    /// One log line per completed request.
    pub(crate) fn log_progress(&self) {
        let snapshot = self.snapshot();
        tracing::info!(
            "Processed {}/{} requests. {} currently processing. {} remaining. \
             Estimated time left: {:.2} seconds.",
            snapshot.completed,
            snapshot.total,
            snapshot.active,
            snapshot.remaining,
            snapshot.estimated_secs_remaining,
        );
    }
}
