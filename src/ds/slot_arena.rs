//! Generational slot arena.
//!
//! Values live in a `Vec` of slots addressed by [`SlotId`]. Removing a value
//! retires its slot: the slot becomes a tombstone and its generation is
//! bumped, so every `SlotId` handed out for the old value stops resolving.
//! A retired slot is reused by a later `insert`, but under the new
//! generation, so a stale id can never alias the new occupant. A slot whose
//! generation is exhausted is retired for good instead of wrapping.
//!
//! ```text
//!   slots: [ Occupied{gen 0, A} | Tombstone{gen 1} | Occupied{gen 3, C} ]
//!   free_list: [1]
//!
//!   SlotId(1, gen 0)  ──► None   (retired)
//!   SlotId(2, gen 3)  ──► Some(C)
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Tombstone { generation: u32 },
}

impl<T> Slot<T> {
    fn generation(&self) -> u32 {
        match self {
            Slot::Occupied { generation, .. } | Slot::Tombstone { generation } => *generation,
        }
    }
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let id = if let Some(index) = self.free_list.pop() {
            let generation = self.slots[index].generation();
            self.slots[index] = Slot::Occupied { generation, value };
            SlotId { index, generation }
        } else {
            self.slots.push(Slot::Occupied {
                generation: 0,
                value,
            });
            SlotId {
                index: self.slots.len() - 1,
                generation: 0,
            }
        };
        self.len += 1;
        id
    }

    /// Retires the slot behind `id` and returns its value.
    ///
    /// Returns `None` if `id` is stale or was never issued.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {}
            _ => return None,
        }
        let next_generation = id.generation.checked_add(1);
        let retired = Slot::Tombstone {
            generation: next_generation.unwrap_or(id.generation),
        };
        let Slot::Occupied { value, .. } = std::mem::replace(slot, retired) else {
            return None;
        };
        if next_generation.is_some() {
            self.free_list.push(id.index);
        }
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.index)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.index)? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[cfg(test)]
    fn retire_with_generation(&mut self, index: usize, generation: u32) {
        self.slots[index] = Slot::Tombstone { generation };
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, value } => Some((
                    SlotId {
                        index,
                        generation: *generation,
                    },
                    value,
                )),
                Slot::Tombstone { .. } => None,
            })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
