use std::{cmp::Ordering, hash::Hash, mem};

use ahash::{HashMap, HashMapExt};

use super::HeapError;

/// Receipt for an inserted entry. Extraction invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryRef(usize);

/// A min-priority queue with amortized O(1) `insert` and `decrease_key` and
/// amortized O(log n) `extract_min`, specialized for Dijkstra-style search.
///
/// Nodes live in an arena and reference each other through indices, so the
/// parent/child/sibling structure carries no ownership cycles. Each payload
/// is tracked in an identity map so `decrease_key` can address entries by
/// value. Payloads are compared with `Eq`; inserting two `Eq`-equal payloads
/// is allowed and both stay individually extractable, but `decrease_key`
/// cannot tell them apart and targets the entry that was tracked first.
pub struct FibonacciHeap<K, T> {
    slots: Vec<Slot<K, T>>,
    free_head: Option<usize>,
    min: Option<usize>,
    len: usize,
    lookup: HashMap<T, Vec<usize>>,
}

struct Node<K, T> {
    key: K,
    value: T,
    degree: u32,
    marked: bool,
    parent: Option<usize>,
    /// Entry point into the circular list of children.
    child: Option<usize>,
    left: usize,
    right: usize,
}

enum Slot<K, T> {
    Occupied(Node<K, T>),
    Free { next: Option<usize> },
}

fn key_lt<K: PartialOrd>(a: &K, b: &K) -> bool {
    matches!(a.partial_cmp(b), Some(Ordering::Less))
}

impl<K, T> Default for FibonacciHeap<K, T>
where
    K: PartialOrd + Copy,
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> FibonacciHeap<K, T>
where
    K: PartialOrd + Copy,
    T: Eq + Hash + Clone,
{
    pub fn new() -> FibonacciHeap<K, T> {
        FibonacciHeap {
            slots: Vec::new(),
            free_head: None,
            min: None,
            len: 0,
            lookup: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a key/value pair as a new root. Rejects keys that are not
    /// totally ordered with themselves (a float NaN, for example) so every
    /// later comparison is well defined.
    pub fn insert(&mut self, key: K, value: T) -> Result<EntryRef, HeapError> {
        if key.partial_cmp(&key).is_none() {
            return Err(HeapError::InvalidKey);
        }

        let index = self.alloc(key, value.clone());
        self.add_to_root_list(index);

        let min = self.min.expect("just added a root");
        if key_lt(&self.node(index).key, &self.node(min).key) {
            self.min = Some(index);
        }

        self.lookup.entry(value).or_default().push(index);
        self.len += 1;
        Ok(EntryRef(index))
    }

    /// Removes and returns the minimum-key entry, or `None` on an empty
    /// queue. Children of the removed node become roots, then roots of equal
    /// degree are linked until all degrees are distinct, which keeps the
    /// root list at O(log n) entries.
    pub fn extract_min(&mut self) -> Option<(K, T)> {
        let min_index = self.min?;

        let children = self.list_indices(self.node(min_index).child);
        for child in children {
            self.promote_to_root(child);
        }

        let right = self.node(min_index).right;
        self.unlink(min_index);
        if right == min_index {
            self.min = None;
        } else {
            self.min = Some(right);
            self.consolidate();
        }

        let node = self.release(min_index);
        self.forget(&node.value, min_index);
        self.len -= 1;
        Some((node.key, node.value))
    }

    /// Lowers the key tracked for `value`. Returns `Ok(false)` without
    /// touching the heap when `new_key` is not strictly smaller than the
    /// current key, and `Err(HeapError::NotFound)` when `value` is not in
    /// the queue (it may already have been extracted).
    pub fn decrease_key(&mut self, value: &T, new_key: K) -> Result<bool, HeapError> {
        let index = *self
            .lookup
            .get(value)
            .and_then(|bucket| bucket.first())
            .ok_or(HeapError::NotFound)?;

        if !key_lt(&new_key, &self.node(index).key) {
            return Ok(false);
        }

        self.node_mut(index).key = new_key;

        let violates_heap_order = match self.node(index).parent {
            Some(parent) => key_lt(&new_key, &self.node(parent).key),
            None => false,
        };
        if violates_heap_order {
            // Cut the node, then keep cutting marked ancestors. The first
            // unmarked non-root ancestor gets marked instead.
            let mut current = index;
            loop {
                let parent = self
                    .node(current)
                    .parent
                    .expect("cut only walks non-root nodes");
                self.promote_to_root(current);
                current = parent;
                if !self.node(current).marked {
                    break;
                }
            }
            if self.node(current).parent.is_some() {
                self.node_mut(current).marked = true;
            }
        }

        // Only after the cut: the min pointer doubles as the root-list
        // anchor for splices, so it must keep pointing at an established
        // root while nodes are being promoted.
        let min = self.min.expect("heap holds at least the decreased entry");
        if key_lt(&new_key, &self.node(min).key) {
            self.min = Some(index);
        }

        Ok(true)
    }

    fn node(&self, index: usize) -> &Node<K, T> {
        match &self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("dangling heap node index"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<K, T> {
        match &mut self.slots[index] {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("dangling heap node index"),
        }
    }

    fn alloc(&mut self, key: K, value: T) -> usize {
        let node = Node {
            key,
            value,
            degree: 0,
            marked: false,
            parent: None,
            child: None,
            left: 0,
            right: 0,
        };

        let index = match self.free_head {
            Some(free) => {
                self.free_head = match self.slots[free] {
                    Slot::Free { next } => next,
                    Slot::Occupied(_) => unreachable!("free list points at a live node"),
                };
                self.slots[free] = Slot::Occupied(node);
                free
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };

        self.node_mut(index).left = index;
        self.node_mut(index).right = index;
        index
    }

    fn release(&mut self, index: usize) -> Node<K, T> {
        let slot = mem::replace(
            &mut self.slots[index],
            Slot::Free {
                next: self.free_head,
            },
        );
        self.free_head = Some(index);
        match slot {
            Slot::Occupied(node) => node,
            Slot::Free { .. } => unreachable!("released a free slot"),
        }
    }

    fn forget(&mut self, value: &T, index: usize) {
        if let Some(bucket) = self.lookup.get_mut(value) {
            bucket.retain(|&tracked| tracked != index);
            if bucket.is_empty() {
                self.lookup.remove(value);
            }
        }
    }

    /// Splices `index` (a self-linked singleton) into the list right of
    /// `anchor`.
    fn splice_after(&mut self, anchor: usize, index: usize) {
        let right = self.node(anchor).right;
        self.node_mut(index).left = anchor;
        self.node_mut(index).right = right;
        self.node_mut(anchor).right = index;
        self.node_mut(right).left = index;
    }

    /// Removes `index` from its circular list, leaving it self-linked.
    fn unlink(&mut self, index: usize) {
        let left = self.node(index).left;
        let right = self.node(index).right;
        self.node_mut(left).right = right;
        self.node_mut(right).left = left;
        self.node_mut(index).left = index;
        self.node_mut(index).right = index;
    }

    fn add_to_root_list(&mut self, index: usize) {
        match self.min {
            Some(anchor) => self.splice_after(anchor, index),
            None => self.min = Some(index),
        }
    }

    /// Detaches `index` from its parent (if any) and makes it an unmarked
    /// root.
    fn promote_to_root(&mut self, index: usize) {
        if let Some(parent) = self.node(index).parent {
            let right = self.node(index).right;
            let parent_node = self.node_mut(parent);
            parent_node.degree -= 1;
            if parent_node.degree == 0 {
                parent_node.child = None;
            } else if parent_node.child == Some(index) {
                parent_node.child = Some(right);
            }

            self.unlink(index);
            self.node_mut(index).parent = None;
            self.add_to_root_list(index);
        }
        // Roots are never marked.
        self.node_mut(index).marked = false;
    }

    /// Makes the root `child` a child of the root `parent`.
    fn link(&mut self, parent: usize, child: usize) {
        self.unlink(child);
        self.node_mut(child).parent = Some(parent);
        match self.node(parent).child {
            Some(first_child) => self.splice_after(first_child, child),
            None => self.node_mut(parent).child = Some(child),
        }
        self.node_mut(parent).degree += 1;
    }

    /// Links roots of equal degree until all degrees are distinct, then
    /// rescans the surviving roots for the minimum.
    fn consolidate(&mut self) {
        let roots = self.list_indices(self.min);
        let mut root_with_degree: Vec<Option<usize>> = Vec::new();

        for mut root in roots {
            loop {
                let degree = self.node(root).degree as usize;
                if root_with_degree.len() <= degree {
                    root_with_degree.resize(degree + 1, None);
                }
                match root_with_degree[degree].take() {
                    Some(other) => {
                        let (parent, child) =
                            if key_lt(&self.node(other).key, &self.node(root).key) {
                                (other, root)
                            } else {
                                (root, other)
                            };
                        self.link(parent, child);
                        root = parent;
                    }
                    None => {
                        root_with_degree[degree] = Some(root);
                        break;
                    }
                }
            }
        }

        let mut new_min = None;
        for root in root_with_degree.into_iter().flatten() {
            new_min = match new_min {
                Some(best) if !key_lt(&self.node(root).key, &self.node(best).key) => Some(best),
                _ => Some(root),
            };
        }
        self.min = new_min;
    }

    /// Collects the indices of one circular list, starting at `entry`.
    fn list_indices(&self, entry: Option<usize>) -> Vec<usize> {
        let mut indices = Vec::new();
        if let Some(first) = entry {
            let mut current = first;
            loop {
                indices.push(current);
                current = self.node(current).right;
                if current == first {
                    break;
                }
            }
        }
        indices
    }
}
