//! # Metrics traits
//!
//! Recording, snapshotting, and exporting are split into separate traits:
//! recorders only write counters, providers only read them, exporters only
//! publish snapshots.
//!
//! Recorders take `&self` because the queue is shared across threads; the
//! counters behind them are atomics.

/// Counters recorded by the queue facade.
pub trait QueueMetricsRecorder {
    fn record_add_call(&self);
    fn record_add_new(&self);
    fn record_add_duplicate(&self);
    /// An `add` linked nothing because a racing `remove` or `clear` retired its node.
    fn record_add_rolled_back(&self);
    fn record_remove_call(&self);
    fn record_remove_found(&self);
    /// The index still held the element but the node was already tombstoned.
    fn record_remove_stale(&self);
    fn record_move_call(&self);
    fn record_move_found(&self);
    fn record_poll_call(&self);
    fn record_poll_found(&self);
    fn record_clear(&self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
