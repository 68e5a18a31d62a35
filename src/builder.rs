//! Builder for [`FastRemovalQueue`] instances.
//!
//! Hides index sharding and arena pre-sizing behind a small API.
//!
//! ## Example
//!
//! ```rust
//! use cachequeue::builder::QueueBuilder;
//!
//! let queue = QueueBuilder::new().capacity(1024).shards(8).build::<u64>();
//! queue.add(1);
//! assert_eq!(queue.poll(), Some(1));
//! assert_eq!(queue.shard_count(), 8);
//! ```

use std::hash::Hash;

use crate::ds::index::DEFAULT_INDEX_SHARDS;
use crate::ds::shard::ShardSelector;
use crate::error::ConfigError;
use crate::queue::FastRemovalQueue;

/// Builder for creating queue instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueBuilder {
    capacity: usize,
    shards: usize,
    seed: u64,
}

impl QueueBuilder {
    /// Creates a builder with no pre-sizing and the default shard count.
    pub fn new() -> Self {
        Self {
            capacity: 0,
            shards: DEFAULT_INDEX_SHARDS,
            seed: 0,
        }
    }

    /// Expected number of elements; pre-sizes the node arena and index shards.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Number of index shards. More shards means less lock contention on lookups.
    pub fn shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Seed for the element-to-shard hash.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds a queue, clamping a zero shard count to one.
    pub fn build<E>(self) -> FastRemovalQueue<E>
    where
        E: Eq + Hash + Clone,
    {
        tracing::debug!(
            capacity = self.capacity,
            shards = self.shards.max(1),
            "building fast removal queue"
        );
        FastRemovalQueue::with_selector(self.capacity, ShardSelector::new(self.shards, self.seed))
    }

    /// Builds a queue, rejecting invalid parameters.
    pub fn try_build<E>(self) -> Result<FastRemovalQueue<E>, ConfigError>
    where
        E: Eq + Hash + Clone,
    {
        if self.shards == 0 {
            return Err(ConfigError::new("shards must be > 0"));
        }
        Ok(self.build())
    }
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self::new()
    }
}
