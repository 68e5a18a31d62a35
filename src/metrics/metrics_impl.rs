use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::QueueMetricsSnapshot;
use crate::metrics::traits::{MetricsReset, QueueMetricsRecorder};

/// Atomic counters for a concurrent queue.
///
/// All updates are `Relaxed`: counters are observational and never order
/// queue operations.
#[derive(Debug, Default)]
pub struct QueueMetrics {
    add_calls: AtomicU64,
    add_new: AtomicU64,
    add_duplicates: AtomicU64,
    add_rolled_back: AtomicU64,
    remove_calls: AtomicU64,
    remove_found: AtomicU64,
    remove_stale: AtomicU64,
    move_calls: AtomicU64,
    move_found: AtomicU64,
    poll_calls: AtomicU64,
    poll_found: AtomicU64,
    clear_calls: AtomicU64,
}

impl QueueMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the counters; gauges are filled in by the caller.
    pub fn snapshot_with(&self, len: usize, index_len: usize) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot {
            add_calls: self.add_calls.load(Ordering::Relaxed),
            add_new: self.add_new.load(Ordering::Relaxed),
            add_duplicates: self.add_duplicates.load(Ordering::Relaxed),
            add_rolled_back: self.add_rolled_back.load(Ordering::Relaxed),
            remove_calls: self.remove_calls.load(Ordering::Relaxed),
            remove_found: self.remove_found.load(Ordering::Relaxed),
            remove_stale: self.remove_stale.load(Ordering::Relaxed),
            move_calls: self.move_calls.load(Ordering::Relaxed),
            move_found: self.move_found.load(Ordering::Relaxed),
            poll_calls: self.poll_calls.load(Ordering::Relaxed),
            poll_found: self.poll_found.load(Ordering::Relaxed),
            clear_calls: self.clear_calls.load(Ordering::Relaxed),
            len,
            index_len,
        }
    }

    fn counters(&self) -> [&AtomicU64; 12] {
        [
            &self.add_calls,
            &self.add_new,
            &self.add_duplicates,
            &self.add_rolled_back,
            &self.remove_calls,
            &self.remove_found,
            &self.remove_stale,
            &self.move_calls,
            &self.move_found,
            &self.poll_calls,
            &self.poll_found,
            &self.clear_calls,
        ]
    }
}

impl QueueMetricsRecorder for QueueMetrics {
    fn record_add_call(&self) {
        self.add_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_add_new(&self) {
        self.add_new.fetch_add(1, Ordering::Relaxed);
    }

    fn record_add_duplicate(&self) {
        self.add_duplicates.fetch_add(1, Ordering::Relaxed);
    }

    fn record_add_rolled_back(&self) {
        self.add_rolled_back.fetch_add(1, Ordering::Relaxed);
    }

    fn record_remove_call(&self) {
        self.remove_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_remove_found(&self) {
        self.remove_found.fetch_add(1, Ordering::Relaxed);
    }

    fn record_remove_stale(&self) {
        self.remove_stale.fetch_add(1, Ordering::Relaxed);
    }

    fn record_move_call(&self) {
        self.move_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_move_found(&self) {
        self.move_found.fetch_add(1, Ordering::Relaxed);
    }

    fn record_poll_call(&self) {
        self.poll_calls.fetch_add(1, Ordering::Relaxed);
    }

    fn record_poll_found(&self) {
        self.poll_found.fetch_add(1, Ordering::Relaxed);
    }

    fn record_clear(&self) {
        self.clear_calls.fetch_add(1, Ordering::Relaxed);
    }
}

impl MetricsReset for QueueMetrics {
    fn reset_metrics(&self) {
        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
