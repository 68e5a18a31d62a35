pub use crate::builder::QueueBuilder;
pub use crate::ds::{ConcurrentOrderedList, NodeId, OrderedList, ShardedIndex};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    MetricsExporter, MetricsReset, MetricsSnapshotProvider, QueueMetricsSnapshot,
};
pub use crate::queue::FastRemovalQueue;
