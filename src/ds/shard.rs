//! Seeded key-to-shard mapping used by [`ShardedIndex`](crate::ds::ShardedIndex).
//!
//! ```text
//!   key ──► SipHash(seed, key) % shards ──► shard index
//!
//!   ┌─────────┬─────────┬─────────┬─────────┐
//!   │ Shard 0 │ Shard 1 │ Shard 2 │ Shard 3 │
//!   │  A, E   │  B, F   │  C, G   │  D, H   │
//!   └─────────┴─────────┴─────────┴─────────┘
//! ```
//!
//! The shard hash must stay a different function from the `FxHash` used
//! inside each shard's map, or keys sharing a shard also share buckets.
//!
//! ## Example Usage
//!
//! ```
//! use cachequeue::ds::ShardSelector;
//!
//! let selector = ShardSelector::new(4, 0);
//! let shard = selector.shard_for_key(&"user:123");
//! assert!(shard < 4);
//! assert_eq!(selector.shard_for_key(&"user:123"), shard);
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic shard selector using a seeded hash.
///
/// The same `(key, seed, shards)` tuple always produces the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardSelector {
    shards: usize,
    seed: u64,
}

impl ShardSelector {
    /// Creates a selector for `shards` shards with the given `seed`.
    ///
    /// The shard count is clamped to at least 1.
    pub fn new(shards: usize, seed: u64) -> Self {
        Self {
            shards: shards.max(1),
            seed,
        }
    }

    pub fn shard_count(&self) -> usize {
        self.shards
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Maps a key to a shard index in `[0, shards)`.
    pub fn shard_for_key<K: Hash + ?Sized>(&self, key: &K) -> usize {
        if self.shards == 1 {
            return 0;
        }
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) % self.shards
    }
}

impl Default for ShardSelector {
    /// Creates a single-shard selector with seed 0.
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_selector_is_deterministic() {
        let selector = ShardSelector::new(8, 123);

        let a = selector.shard_for_key(&"key");
        let b = selector.shard_for_key(&"key");
        assert_eq!(a, b);
        assert!(a < selector.shard_count());
    }

    #[test]
    fn zero_shards_clamped_to_one() {
        let selector = ShardSelector::new(0, 7);
        assert_eq!(selector.shard_count(), 1);
        assert_eq!(selector.shard_for_key(&42_u64), 0);
        assert_eq!(selector.seed(), 7);
    }

    #[test]
    fn keys_spread_across_shards() {
        let selector = ShardSelector::new(4, 0);
        let mut seen = [false; 4];
        for key in 0..256_u64 {
            seen[selector.shard_for_key(&key)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
