//! Generational node storage for [`RecencyList`](crate::ds::RecencyList).
//!
//! Every entry is either occupied or vacant, and carries a generation that
//! is bumped each time the entry is vacated. A [`SlotId`] records the
//! generation it was issued under, so a handle kept past `remove` (or
//! `clear`) never reaches whatever later reuses its index.
//!
//! Vacant entries are threaded into a free list through the entries
//! themselves; no side vector is kept.
//!
//! ```text
//!   entries:   [ Occupied{g0, a} | Vacant{g1, next: 3} | Occupied{g0, c} | Vacant{g2, next: -} ]
//!   free_head: 1                  next insert lands in entry 1 as generation 1
//! ```

/// Handle to a value stored in a [`SlotArena`].
///
/// Only valid for the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

#[derive(Debug)]
enum Entry<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<usize> },
}

/// Reusable entries addressed by generation-checked [`SlotId`]s.
#[derive(Debug)]
pub struct SlotArena<T> {
    entries: Vec<Entry<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores `value` in the most recently vacated entry, or a new one.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.len += 1;
        if let Some(index) = self.free_head {
            if let Entry::Vacant {
                generation,
                next_free,
            } = self.entries[index]
            {
                self.free_head = next_free;
                self.entries[index] = Entry::Occupied { generation, value };
                return SlotId { index, generation };
            }
        }
        self.entries.push(Entry::Occupied {
            generation: 0,
            value,
        });
        SlotId {
            index: self.entries.len() - 1,
            generation: 0,
        }
    }

    /// Takes the value out of `id`; `None` for a stale or unknown handle.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if !self.contains(id) {
            return None;
        }
        let vacant = Entry::Vacant {
            generation: id.generation.wrapping_add(1),
            next_free: self.free_head,
        };
        match std::mem::replace(&mut self.entries[id.index], vacant) {
            Entry::Occupied { value, .. } => {
                self.free_head = Some(id.index);
                self.len -= 1;
                Some(value)
            },
            Entry::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.entries.get(id.index)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.entries.get_mut(id.index)? {
            Entry::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of occupied entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Vacates every entry, invalidating all outstanding handles.
    ///
    /// Allocated entries are kept for reuse.
    pub fn clear(&mut self) {
        let mut next_free = None;
        for (index, entry) in self.entries.iter_mut().enumerate().rev() {
            let generation = match entry {
                Entry::Occupied { generation, .. } => generation.wrapping_add(1),
                Entry::Vacant { generation, .. } => *generation,
            };
            *entry = Entry::Vacant {
                generation,
                next_free,
            };
            next_free = Some(index);
        }
        self.free_head = next_free;
        self.len = 0;
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
