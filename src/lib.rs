//! cachequeue: a concurrent ordered set with O(1) removal, for building
//! FIFO and LRU eviction queues.
//!
//! See `DESIGN.md` for internal architecture and invariants.

pub mod builder;
pub mod ds;
pub mod error;
pub mod queue;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;

pub use queue::FastRemovalQueue;
