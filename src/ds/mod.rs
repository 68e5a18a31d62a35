pub mod index;
pub mod ordered_list;
pub mod shard;
pub mod slot_arena;

pub use index::{DEFAULT_INDEX_SHARDS, ShardedIndex};
pub use ordered_list::{ConcurrentOrderedList, NodeId, OrderedList};
pub use shard::ShardSelector;
pub use slot_arena::{SlotArena, SlotId};
