//! Sharded concurrent index from element to node handle.
//!
//! ## Architecture
//! - Keys are split across `N` shards by [`ShardSelector`].
//! - Each shard is a `parking_lot::RwLock<FxHashMap<K, V>>`.
//! - Every operation touches exactly one shard and holds its lock only for
//!   the single map call, so lookups on different shards never contend.
//!
//! ## Core Operations
//! - `insert_if_absent`: atomic de-duplication gate.
//! - `get` / `contains`: read-locked lookup.
//! - `remove`: atomic remove-and-return.
//! - `remove_if_eq`: remove only while the entry still holds an expected value.
//! - `clear`: clears shard by shard (not atomic across shards).
//!
//! ## Thread Safety
//! `ShardedIndex` is `Send + Sync` when `K` and `V` are. It never calls out
//! while holding a shard lock, so it cannot participate in a lock cycle with
//! the list lock.
use std::collections::hash_map::Entry;
use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::shard::ShardSelector;

/// Default number of index shards.
pub const DEFAULT_INDEX_SHARDS: usize = 16;

#[derive(Debug)]
pub struct ShardedIndex<K, V> {
    shards: Vec<RwLock<FxHashMap<K, V>>>,
    selector: ShardSelector,
}

impl<K, V> ShardedIndex<K, V>
where
    K: Eq + Hash,
    V: Copy + PartialEq,
{
    /// Creates an index with [`DEFAULT_INDEX_SHARDS`] shards.
    pub fn new() -> Self {
        Self::with_selector(0, ShardSelector::new(DEFAULT_INDEX_SHARDS, 0))
    }

    /// Creates an index pre-sized for `capacity` keys spread over the selector's shards.
    pub fn with_selector(capacity: usize, selector: ShardSelector) -> Self {
        let shard_count = selector.shard_count();
        let per_shard = capacity.div_ceil(shard_count);
        let shards = (0..shard_count)
            .map(|_| {
                RwLock::new(FxHashMap::with_capacity_and_hasher(
                    per_shard,
                    Default::default(),
                ))
            })
            .collect();
        Self { shards, selector }
    }

    fn shard(&self, key: &K) -> &RwLock<FxHashMap<K, V>> {
        &self.shards[self.selector.shard_for_key(key)]
    }

    /// Inserts `value` only if `key` has no entry; returns whether it did.
    pub fn insert_if_absent(&self, key: K, value: V) -> bool {
        let mut shard = self.shard(&key).write();
        match shard.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            },
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.shard(key).read().get(key).copied()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.shard(key).read().contains_key(key)
    }

    /// Removes and returns the entry for `key`.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.shard(key).write().remove(key)
    }

    /// Removes the entry for `key` only if it still maps to `expected`.
    pub fn remove_if_eq(&self, key: &K, expected: V) -> bool {
        let mut shard = self.shard(key).write();
        if shard.get(key) == Some(&expected) {
            shard.remove(key);
            true
        } else {
            false
        }
    }

    /// Drops every entry, one shard at a time.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }

    /// Sums shard sizes; concurrent writers may make the total stale.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Copies every entry, shard by shard; not a point-in-time view across shards.
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
    {
        let mut entries = Vec::new();
        for shard in &self.shards {
            let shard = shard.read();
            entries.extend(shard.iter().map(|(key, value)| (key.clone(), *value)));
        }
        entries
    }
}

impl<K, V> Default for ShardedIndex<K, V>
where
    K: Eq + Hash,
    V: Copy + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}
