//! Concurrent ordered set with O(1) removal by element.
//!
//! [`FastRemovalQueue`] pairs a [`ShardedIndex`] (element → [`NodeId`]) with a
//! [`ConcurrentOrderedList`] (the order itself). It is the building block for
//! FIFO and LRU eviction queues: the cache adds keys as they are admitted,
//! calls [`move_to_tail`](FastRemovalQueue::move_to_tail) on access when it
//! wants recency order, [`remove`](FastRemovalQueue::remove)s keys that are
//! invalidated, and [`poll`](FastRemovalQueue::poll)s the head to evict.
//!
//! ## Architecture
//!
//! ```text
//!   ShardedIndex<E, NodeId>              ConcurrentOrderedList<E>
//!   (per-shard RwLock)                   (one Mutex)
//!   ┌───────┬────────┐
//!   │ "a"   │ id_1 ──┼──────────►  head ─► [id_1 a] ◄─► [id_2 b] ◄─► [id_3 c] ◄─ tail
//!   │ "b"   │ id_2 ──┼──────────────────────────────────────┘             │
//!   │ "c"   │ id_3 ──┼────────────────────────────────────────────────────┘
//!   └───────┴────────┘
//! ```
//!
//! Every facade operation touches the index first and the list second. The
//! two locks are never held together, so a composite operation is not atomic
//! as a whole. Stale handles are what make the windows safe: a node retired
//! by one thread (popped, removed, or cleared) can still be looked up by
//! another, but every list operation through its handle is rejected.
//!
//! ## Operations
//!
//! | Operation      | Index step              | List step                |
//! |----------------|-------------------------|--------------------------|
//! | `add`          | `insert_if_absent`      | `reserve` + `append`     |
//! | `move_to_tail` | `get`                   | `move_to_tail`           |
//! | `remove`       | `remove`                | `remove`                 |
//! | `poll`         | `remove_if_eq`          | `remove_first`           |
//! | `clear`        | `clear`                 | `clear`                  |
//!
//! ## Example Usage
//!
//! ```
//! use cachequeue::queue::FastRemovalQueue;
//!
//! let queue = FastRemovalQueue::new();
//! queue.add("a");
//! queue.add("b");
//! queue.add("c");
//!
//! assert!(queue.move_to_tail(&"a"));
//! assert!(queue.remove(&"b"));
//!
//! assert_eq!(queue.poll(), Some("c"));
//! assert_eq!(queue.poll(), Some("a"));
//! assert_eq!(queue.poll(), None);
//! ```
//!
//! ## Consistency
//!
//! `add` of an element that is already present is a no-op, not a touch.
//! `clear` clears the index and then the list; an `add` racing with it may
//! survive or vanish. If it finishes between the two steps its index entry
//! outlives the node; `contains` ignores such entries, and `add` and
//! `move_to_tail` prune them when they meet them, so the element can be
//! added again.
use std::fmt;
use std::hash::Hash;

use crate::ds::index::{DEFAULT_INDEX_SHARDS, ShardedIndex};
use crate::ds::ordered_list::{ConcurrentOrderedList, NodeId};
use crate::ds::shard::ShardSelector;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::{
    MetricsReset, MetricsSnapshotProvider, QueueMetrics, QueueMetricsRecorder,
    QueueMetricsSnapshot,
};

macro_rules! record {
    ($queue:expr, $method:ident) => {
        #[cfg(feature = "metrics")]
        $queue.metrics.$method();
    };
}

/// Thread-safe queue with O(1) `add`, `remove`, `move_to_tail` and `poll`.
///
/// Elements are unique keys; the queue stores no values. Head is the oldest
/// element, tail the newest (or most recently moved).
pub struct FastRemovalQueue<E> {
    index: ShardedIndex<E, NodeId>,
    list: ConcurrentOrderedList<E>,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<E> FastRemovalQueue<E>
where
    E: Eq + Hash + Clone,
{
    /// Creates an empty queue with the default index shard count.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue pre-sized for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_selector(capacity, ShardSelector::new(DEFAULT_INDEX_SHARDS, 0))
    }

    pub(crate) fn with_selector(capacity: usize, selector: ShardSelector) -> Self {
        Self {
            index: ShardedIndex::with_selector(capacity, selector),
            list: ConcurrentOrderedList::with_capacity(capacity),
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::new(),
        }
    }

    /// Adds `element` at the tail if it is not already present.
    ///
    /// Returns `true` if the element was linked by this call. Adding an
    /// element that is already queued changes nothing; use
    /// [`move_to_tail`](Self::move_to_tail) for touch semantics.
    pub fn add(&self, element: E) -> bool {
        record!(self, record_add_call);
        if let Some(existing) = self.index.get(&element) {
            if self.list.contains(existing) {
                record!(self, record_add_duplicate);
                return false;
            }
            // Entry outlived its node (an add that finished inside a clear).
            self.index.remove_if_eq(&element, existing);
            tracing::trace!(node = existing.index(), "add pruned stale index entry");
        }

        let id = self.list.reserve(element.clone());
        if !self.index.insert_if_absent(element.clone(), id) {
            self.list.remove(id);
            record!(self, record_add_duplicate);
            return false;
        }

        if self.list.append(id) {
            record!(self, record_add_new);
            return true;
        }

        // A racing remove or clear retired the node before it was linked.
        self.index.remove_if_eq(&element, id);
        record!(self, record_add_rolled_back);
        tracing::trace!(node = id.index(), "add rolled back on tombstoned node");
        false
    }

    /// Moves `element` to the tail.
    ///
    /// Returns `false` if the element is absent, or if its node was retired
    /// by a racing `remove`/`poll` after the index lookup.
    pub fn move_to_tail(&self, element: &E) -> bool {
        record!(self, record_move_call);
        let Some(id) = self.index.get(element) else {
            return false;
        };
        if self.list.move_to_tail(id) {
            record!(self, record_move_found);
            true
        } else {
            self.index.remove_if_eq(element, id);
            tracing::trace!(node = id.index(), "move_to_tail skipped tombstoned node");
            false
        }
    }

    /// Removes `element`; returns `false` if it was absent or already removed.
    pub fn remove(&self, element: &E) -> bool {
        record!(self, record_remove_call);
        let Some(id) = self.index.remove(element) else {
            return false;
        };
        if self.list.remove(id).is_some() {
            record!(self, record_remove_found);
            true
        } else {
            record!(self, record_remove_stale);
            tracing::trace!(node = id.index(), "remove found tombstoned node");
            false
        }
    }

    /// Removes and returns the head element.
    pub fn poll(&self) -> Option<E> {
        record!(self, record_poll_call);
        let (id, element) = self.list.remove_first()?;
        self.index.remove_if_eq(&element, id);
        record!(self, record_poll_found);
        Some(element)
    }

    /// Drops every element.
    ///
    /// Clears the index, then the list. Each step is atomic on its own; the
    /// pair is not. The list lock is held only to swap out the nodes, which
    /// are dropped after it is released.
    pub fn clear(&self) {
        record!(self, record_clear);
        self.index.clear();
        let dropped = self.list.clear();
        tracing::debug!(dropped, "queue cleared");
    }

    /// Returns the number of linked elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns `true` if `element` is queued or being added.
    ///
    /// An index entry whose node was retired by a racing `clear` does not count.
    pub fn contains(&self, element: &E) -> bool {
        self.index
            .get(element)
            .is_some_and(|id| self.list.contains(id))
    }

    /// Returns a clone of the head element without removing it.
    pub fn peek(&self) -> Option<E> {
        self.list.front_with(E::clone)
    }

    /// Clones the elements from head to tail under the list lock.
    pub fn to_vec(&self) -> Vec<E> {
        self.list.snapshot()
    }

    /// Number of index shards.
    pub fn shard_count(&self) -> usize {
        self.index.shard_count()
    }

    /// Checks the chain, then cross-checks index and chain.
    ///
    /// Only meaningful while no other thread is mutating the queue.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.list.check_invariants()?;

        let index_len = self.index.len();
        let list_len = self.list.len();
        if index_len != list_len {
            return Err(InvariantError::new(format!(
                "index has {index_len} entries, list has {list_len} nodes"
            )));
        }

        for (element, id) in self.index.entries() {
            match self.list.get_with(id, |value| *value == element) {
                Some(true) if self.list.is_linked(id) => {},
                Some(true) => {
                    return Err(InvariantError::new(format!(
                        "index entry points at unlinked node {}",
                        id.index()
                    )));
                },
                Some(false) => {
                    return Err(InvariantError::new(format!(
                        "node {} holds a different element than its index key",
                        id.index()
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "index entry points at tombstoned node {}",
                        id.index()
                    )));
                },
            }
        }
        Ok(())
    }
}

impl<E> Default for FastRemovalQueue<E>
where
    E: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for FastRemovalQueue<E>
where
    E: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastRemovalQueue")
            .field("len", &self.len())
            .field("shards", &self.shard_count())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
impl<E> MetricsSnapshotProvider<QueueMetricsSnapshot> for FastRemovalQueue<E>
where
    E: Eq + Hash + Clone,
{
    fn snapshot(&self) -> QueueMetricsSnapshot {
        self.metrics.snapshot_with(self.list.len(), self.index.len())
    }
}

#[cfg(feature = "metrics")]
impl<E> MetricsReset for FastRemovalQueue<E>
where
    E: Eq + Hash + Clone,
{
    fn reset_metrics(&self) {
        self.metrics.reset_metrics();
    }
}
