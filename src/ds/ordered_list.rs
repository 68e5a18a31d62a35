//! Doubly linked list of arena nodes with tombstone-checked handles.
//!
//! Nodes live in a [`SlotArena`] and are linked by [`NodeId`]. A node is
//! either `Pending` (allocated, not yet in the chain) or `Linked`. Removing
//! or popping a node retires its arena slot, which is the node's tombstone:
//! the handle stops resolving, and every later structural operation through
//! it is rejected without touching the chain.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌────────┬──────────────────────────────────────────────────────┐
//!   │ NodeId │ Node { value, prev, next, state }                    │
//!   ├────────┼──────────────────────────────────────────────────────┤
//!   │ id_1   │ { A, prev: None,       next: Some(id_2), Linked }    │
//!   │ id_2   │ { B, prev: Some(id_1), next: Some(id_3), Linked }    │
//!   │ id_3   │ { C, prev: Some(id_2), next: None,       Linked }    │
//!   │ id_4   │ { D, prev: None,       next: None,       Pending }   │
//!   └────────┴──────────────────────────────────────────────────────┘
//!
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//! ```
//!
//! ## Operations
//! - `reserve(value)`: allocate a pending node
//! - `append(id)`: link a pending node at the tail
//! - `remove(id)`: check tombstone, detach, retire
//! - `move_to_tail(id)`: detach + attach at tail, same node
//! - `remove_first()`: pop head and retire it
//! - `clear()`: swap in an empty arena and start a new epoch
//!
//! All structural operations are O(1). Handles carry the epoch of the arena
//! that issued them, so handles from before a `clear` stay tombstoned even
//! though the fresh arena hands out the same slots again.
//! [`ConcurrentOrderedList`] serializes them behind one `parking_lot::Mutex`
//! and drops the cleared nodes after releasing it.
use parking_lot::Mutex;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Stable handle to a node in an [`OrderedList`].
///
/// Handles are generational: once the node is removed, popped or cleared,
/// the handle is tombstoned and never addresses another node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    slot: SlotId,
    epoch: u64,
}

impl NodeId {
    /// Returns the arena slot index backing this handle.
    pub fn index(self) -> usize {
        self.slot.index()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Pending,
    Linked,
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    state: NodeState,
}

/// Ordered list that stores nodes in a `SlotArena` and links them via `NodeId`.
///
/// Head is the oldest node, tail the newest.
#[derive(Debug)]
pub struct OrderedList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    linked: usize,
    epoch: u64,
    reserved: usize,
}

impl<T> OrderedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty list with reserved node capacity.
    ///
    /// The reservation is repeated for the fresh arena after each `clear`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
            linked: 0,
            epoch: 0,
            reserved: capacity,
        }
    }

    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.linked
    }

    /// Returns `true` if no node is linked.
    pub fn is_empty(&self) -> bool {
        self.linked == 0
    }

    /// Returns the number of allocated nodes, linked or pending.
    pub fn allocated(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if `id` is live (pending or linked).
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Returns `true` if `id` is currently part of the chain.
    pub fn is_linked(&self, id: NodeId) -> bool {
        self.node(id)
            .is_some_and(|node| node.state == NodeState::Linked)
    }

    /// Returns `true` if `id` has been tombstoned.
    pub fn is_tombstoned(&self, id: NodeId) -> bool {
        !self.contains(id)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<NodeId> {
        self.head
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<NodeId> {
        self.tail
    }

    /// Returns the value of a live node.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Returns an iterator from head to tail.
    pub fn iter(&self) -> OrderedListIter<'_, T> {
        OrderedListIter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of `NodeId`s from head to tail.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.head, |id| self.node(*id).and_then(|node| node.next))
    }

    /// Allocates a pending node that is not yet part of the chain.
    pub fn reserve(&mut self, value: T) -> NodeId {
        let slot = self.arena.insert(Node {
            value,
            prev: None,
            next: None,
            state: NodeState::Pending,
        });
        NodeId {
            slot,
            epoch: self.epoch,
        }
    }

    /// Links a pending node as the new tail.
    ///
    /// Returns `false` without touching the chain if `id` is tombstoned or
    /// already linked.
    pub fn append(&mut self, id: NodeId) -> bool {
        match self.node(id).map(|node| node.state) {
            Some(NodeState::Pending) => {
                self.attach_back(id);
                true
            },
            _ => false,
        }
    }

    /// Allocates and links a node at the tail.
    pub fn push_back(&mut self, value: T) -> NodeId {
        let id = self.reserve(value);
        self.attach_back(id);
        id
    }

    /// Removes a live node and returns its value.
    ///
    /// A tombstoned handle returns `None` and leaves the chain untouched. A
    /// pending node is tombstoned without unlinking, so its later `append`
    /// is rejected.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let state = self.node(id)?.state;
        if state == NodeState::Linked {
            self.detach(id);
        }
        self.arena.remove(id.slot).map(|node| node.value)
    }

    /// Moves a node to the tail, keeping its identity.
    ///
    /// Linked nodes are moved and `true` is returned. Pending nodes return
    /// `true` unchanged since their append lands them at the tail anyway.
    /// Tombstoned handles return `false` and change nothing.
    pub fn move_to_tail(&mut self, id: NodeId) -> bool {
        match self.node(id).map(|node| node.state) {
            Some(NodeState::Linked) => {
                if self.tail != Some(id) {
                    self.detach(id);
                    self.attach_back(id);
                }
                true
            },
            Some(NodeState::Pending) => true,
            None => false,
        }
    }

    /// Pops the head node, tombstones it, and returns its handle and value.
    pub fn remove_first(&mut self) -> Option<(NodeId, T)> {
        let id = self.head?;
        self.detach(id);
        self.arena.remove(id.slot).map(|node| (id, node.value))
    }

    /// Drops every node and empties the chain.
    ///
    /// Pending nodes are retired too; outstanding handles all read as
    /// tombstoned afterwards. Returns the number of nodes dropped.
    pub fn clear(&mut self) -> usize {
        let (dropped, _nodes) = self.take_nodes();
        dropped
    }

    // Swaps in an empty arena under a new epoch and hands back the old one,
    // so the caller decides where the old nodes are dropped.
    fn take_nodes(&mut self) -> (usize, SlotArena<Node<T>>) {
        self.epoch = self.epoch.wrapping_add(1);
        self.head = None;
        self.tail = None;
        self.linked = 0;
        let nodes = std::mem::replace(&mut self.arena, SlotArena::with_capacity(self.reserved));
        (nodes.len(), nodes)
    }

    /// Walks the chain in both directions and cross-checks it against the arena.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("head and tail must both be empty"));
            }
            if self.linked != 0 {
                return Err(InvariantError::new(format!(
                    "empty chain but linked count is {}",
                    self.linked
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .node(id)
                .ok_or_else(|| InvariantError::new("tombstoned node reachable from head"))?;
            if node.state != NodeState::Linked {
                return Err(InvariantError::new("pending node found in chain"));
            }
            if node.prev != prev {
                return Err(InvariantError::new("prev link does not match walk order"));
            }
            count += 1;
            if count > self.linked {
                return Err(InvariantError::new("chain longer than linked count"));
            }
            prev = Some(id);
            current = node.next;
        }
        if prev != self.tail {
            return Err(InvariantError::new("forward walk does not end at tail"));
        }
        if count != self.linked {
            return Err(InvariantError::new(format!(
                "chain has {count} nodes, linked count is {}",
                self.linked
            )));
        }

        let mut back_count = 0usize;
        let mut current = self.tail;
        let mut last = None;
        while let Some(id) = current {
            back_count += 1;
            if back_count > self.linked {
                return Err(InvariantError::new("backward walk longer than linked count"));
            }
            last = Some(id);
            current = self.node(id).and_then(|node| node.prev);
        }
        if last != self.head {
            return Err(InvariantError::new("backward walk does not end at head"));
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        if id.epoch != self.epoch {
            return None;
        }
        self.arena.get(id.slot)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if id.epoch != self.epoch {
            return None;
        }
        self.arena.get_mut(id.slot)
    }

    // Unlinks a linked node; leaves it allocated in the Pending state.
    fn detach(&mut self, id: NodeId) -> Option<()> {
        let (prev, next) = {
            let node = self.node(id)?;
            (node.prev, node.next)
        };

        if let Some(prev_id) = prev {
            if let Some(prev_node) = self.node_mut(prev_id) {
                prev_node.next = next;
            }
        } else {
            self.head = next;
        }

        if let Some(next_id) = next {
            if let Some(next_node) = self.node_mut(next_id) {
                next_node.prev = prev;
            }
        } else {
            self.tail = prev;
        }

        let node = self.node_mut(id)?;
        node.prev = None;
        node.next = None;
        node.state = NodeState::Pending;
        self.linked -= 1;
        Some(())
    }

    fn attach_back(&mut self, id: NodeId) -> Option<()> {
        let old_tail = self.tail;
        let node = self.node_mut(id)?;
        node.next = None;
        node.prev = old_tail;
        node.state = NodeState::Linked;

        if let Some(old_tail) = old_tail {
            if let Some(tail_node) = self.node_mut(old_tail) {
                tail_node.next = Some(id);
            }
        } else {
            self.head = Some(id);
        }
        self.tail = Some(id);
        self.linked += 1;
        Some(())
    }
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values from head to tail.
pub struct OrderedListIter<'a, T> {
    list: &'a OrderedList<T>,
    current: Option<NodeId>,
}

impl<'a, T> Iterator for OrderedListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.node(id)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Thread-safe wrapper around `OrderedList` using a `parking_lot::Mutex`.
///
/// Every operation, reads included, takes the one lock for its whole body.
#[derive(Debug)]
pub struct ConcurrentOrderedList<T> {
    inner: Mutex<OrderedList<T>>,
}

impl<T> ConcurrentOrderedList<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(OrderedList::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(OrderedList::with_capacity(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.lock().contains(id)
    }

    pub fn is_linked(&self, id: NodeId) -> bool {
        self.inner.lock().is_linked(id)
    }

    pub fn reserve(&self, value: T) -> NodeId {
        self.inner.lock().reserve(value)
    }

    pub fn append(&self, id: NodeId) -> bool {
        self.inner.lock().append(id)
    }

    pub fn push_back(&self, value: T) -> NodeId {
        self.inner.lock().push_back(value)
    }

    pub fn remove(&self, id: NodeId) -> Option<T> {
        self.inner.lock().remove(id)
    }

    pub fn move_to_tail(&self, id: NodeId) -> bool {
        self.inner.lock().move_to_tail(id)
    }

    pub fn remove_first(&self) -> Option<(NodeId, T)> {
        self.inner.lock().remove_first()
    }

    /// Tries to pop the head without blocking.
    ///
    /// The outer `None` means the lock was contended.
    pub fn try_remove_first(&self) -> Option<Option<(NodeId, T)>> {
        let mut list = self.inner.try_lock()?;
        Some(list.remove_first())
    }

    /// Empties the list; the old nodes are dropped after the lock is released.
    pub fn clear(&self) -> usize {
        let (dropped, nodes) = self.inner.lock().take_nodes();
        drop(nodes);
        dropped
    }

    /// Tries to clear without blocking; returns `None` if the lock was contended.
    pub fn try_clear(&self) -> Option<usize> {
        let (dropped, nodes) = self.inner.try_lock()?.take_nodes();
        drop(nodes);
        Some(dropped)
    }

    /// Runs `f` on the head value, if any.
    pub fn front_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.lock().front().map(f)
    }

    /// Runs `f` on a live node's value.
    pub fn get_with<R>(&self, id: NodeId, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.inner.lock().get(id).map(f)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.lock().check_invariants()
    }
}

impl<T: Clone> ConcurrentOrderedList<T> {
    /// Clones the chain from head to tail under the lock.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().iter().cloned().collect()
    }
}

impl<T> Default for ConcurrentOrderedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
