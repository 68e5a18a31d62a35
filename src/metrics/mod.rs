//! Operation counters for [`FastRemovalQueue`](crate::queue::FastRemovalQueue).
//!
//! Compiled only with the `metrics` feature. Recording goes through
//! [`QueueMetricsRecorder`], reading through
//! [`MetricsSnapshotProvider`], and publishing through [`MetricsExporter`],
//! so monitoring never couples to queue logic.
//!
//! ```text
//!   FastRemovalQueue ──record──► QueueMetrics (atomics)
//!                                     │
//!                         snapshot()  ▼
//!                            QueueMetricsSnapshot ──export──► PrometheusTextExporter
//! ```

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::QueueMetrics;
pub use snapshot::QueueMetricsSnapshot;
pub use traits::{MetricsExporter, MetricsReset, MetricsSnapshotProvider, QueueMetricsRecorder};
