//! Intrusive recency ordering of keys backed by [`SlotArena`].
//!
//! Nodes carry only a key plus `prev`/`next` handles; there is no payload.
//! Callers keep the [`SlotId`] returned by [`RecencyList::push_front`] in
//! their own index and use it to promote or unlink the node in O(1).
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<K>>)
//!   ┌────────┬────────────────────────────────────────┐
//!   │ SlotId │ Node { key, prev, next }               │
//!   ├────────┼────────────────────────────────────────┤
//!   │ id_0   │ { key: 7, prev: None,   next: id_2 }   │
//!   │ id_1   │ { key: 3, prev: id_2,   next: None }   │
//!   │ id_2   │ { key: 9, prev: id_0,   next: id_1 }   │
//!   └────────┴────────────────────────────────────────┘
//!
//!   head (MRU) ─► [7] ◄──► [9] ◄──► [3] ◄── tail (LRU)
//! ```
//!
//! Every link change goes through `detach` and `attach_front`, which update
//! head, tail, prev and next together.
//!
//! ## Performance
//! - `push_front` / `pop_back` / `remove` / `move_to_front`: O(1)
//! - `iter` / `iter_ids`: O(n)
//!
//! `debug_validate_invariants()` is available in debug/test builds.
use crate::ds::slot_arena::{SlotArena, SlotId};

#[derive(Debug)]
struct Node<K> {
    key: K,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked MRU→LRU ordering of keys, addressed by [`SlotId`].
#[derive(Debug)]
pub struct RecencyList<K> {
    arena: SlotArena<Node<K>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<K> RecencyList<K> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` refers to a live node of this list.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Most recently used key.
    pub fn front(&self) -> Option<&K> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Least recently used key.
    pub fn back(&self) -> Option<&K> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Key stored at `id`, if the node is live.
    pub fn get(&self, id: SlotId) -> Option<&K> {
        self.arena.get(id).map(|node| &node.key)
    }

    /// Links `key` in as the new head and returns its handle.
    pub fn push_front(&mut self, key: K) -> SlotId {
        let id = self.arena.insert(Node {
            key,
            prev: None,
            next: None,
        });
        self.attach_front(id);
        id
    }

    /// Unlinks and returns the tail key.
    pub fn pop_back(&mut self) -> Option<K> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Unlinks `id` and frees its slot.
    pub fn remove(&mut self, id: SlotId) -> Option<K> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.key)
    }

    /// Promotes `id` to head; returns `false` if `id` is not live.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.head == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_front(id);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys from head (MRU) to tail (LRU).
    pub fn iter(&self) -> RecencyIter<'_, K> {
        RecencyIter {
            list: self,
            current: self.head,
        }
    }

    /// Handles from head (MRU) to tail (LRU).
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.arena.get(id)?.next;
            Some(id)
        })
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_front(&mut self, id: SlotId) {
        let old_head = self.head;
        match self.arena.get_mut(id) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            },
            None => return,
        }
        match old_head {
            Some(old) => {
                if let Some(head_node) = self.arena.get_mut(old) {
                    head_node.prev = Some(id);
                }
            },
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none() && self.tail.is_none());
            assert_eq!(self.len(), 0);
            return;
        }
        if self.len() == 1 {
            assert_eq!(self.head, self.tail);
        }

        // forward walk
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            let node = self.arena.get(id).expect("dangling next link");
            assert_eq!(node.prev, prev, "prev link mismatch");
            prev = Some(id);
            current = node.next;
            count += 1;
            assert!(count <= self.len(), "cycle in forward walk");
        }
        assert_eq!(prev, self.tail);
        assert_eq!(count, self.len());

        // backward walk
        let mut count = 0usize;
        let mut current = self.tail;
        while let Some(id) = current {
            current = self.arena.get(id).expect("dangling prev link").prev;
            count += 1;
            assert!(count <= self.len(), "cycle in backward walk");
        }
        assert_eq!(count, self.len());
    }
}

impl<K> Default for RecencyList<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over keys from MRU to LRU.
pub struct RecencyIter<'a, K> {
    list: &'a RecencyList<K>,
    current: Option<SlotId>,
}

impl<'a, K> Iterator for RecencyIter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.list.arena.get(id)?;
        self.current = node.next;
        Some(&node.key)
    }
}
