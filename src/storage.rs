//! Arena storage for heap cells
//!
//! Heap cells live in a [`SlotMap`] and reference each other by [`CellKey`]
//! instead of by pointer. Keys are generational, so a key kept after its cell
//! was extracted is detected as stale rather than aliasing a newer cell.
//!
//! # Rings
//!
//! Siblings form a circular doubly-linked ring through `left`/`right`:
//! - A single cell points to itself (both `left` and `right`)
//! - There is no head or tail: any cell can be the entry point
//! - Splicing two rings together is O(1)
//!
//! The root list and every child list of the Fibonacci forest are such rings.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable key of a heap cell inside a [`CellArena`]
    pub struct CellKey;
}

/// One node of the heap forest.
#[derive(Debug, Clone)]
pub(crate) struct Cell<P, V> {
    pub(crate) priority: P,
    pub(crate) value: V,
    pub(crate) parent: Option<CellKey>,
    pub(crate) child: Option<CellKey>,
    pub(crate) left: CellKey,
    pub(crate) right: CellKey,
    pub(crate) degree: usize,
    pub(crate) marked: bool,
}

/// Arena owning every cell of one heap forest.
#[derive(Debug, Clone)]
pub(crate) struct CellArena<P, V> {
    cells: SlotMap<CellKey, Cell<P, V>>,
}

impl<P, V> Default for CellArena<P, V> {
    fn default() -> Self {
        Self {
            cells: SlotMap::with_key(),
        }
    }
}

impl<P, V> std::ops::Index<CellKey> for CellArena<P, V> {
    type Output = Cell<P, V>;

    #[inline]
    fn index(&self, key: CellKey) -> &Self::Output {
        &self.cells[key]
    }
}

impl<P, V> std::ops::IndexMut<CellKey> for CellArena<P, V> {
    #[inline]
    fn index_mut(&mut self, key: CellKey) -> &mut Self::Output {
        &mut self.cells[key]
    }
}

impl<P, V> CellArena<P, V> {
    /// Allocates a detached singleton cell.
    pub(crate) fn insert(&mut self, priority: P, value: V) -> CellKey {
        self.cells.insert_with_key(|key| Cell {
            priority,
            value,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
        })
    }

    /// Frees a cell. The caller must already have unlinked it.
    pub(crate) fn remove(&mut self, key: CellKey) -> Option<Cell<P, V>> {
        self.cells.remove(key)
    }

    #[inline]
    pub(crate) fn get(&self, key: CellKey) -> Option<&Cell<P, V>> {
        self.cells.get(key)
    }

    #[inline]
    pub(crate) fn contains(&self, key: CellKey) -> bool {
        self.cells.contains_key(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn clear(&mut self) {
        self.cells.clear();
    }

    /// Iterates every cell in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellKey, &Cell<P, V>)> {
        self.cells.iter()
    }

    // ========================================================================
    // Ring operations
    // ========================================================================

    /// Inserts the singleton `key` into `anchor`'s ring, just left of `anchor`.
    pub(crate) fn insert_before(&mut self, anchor: CellKey, key: CellKey) {
        let anchor_left = self.cells[anchor].left;
        {
            let cell = &mut self.cells[key];
            cell.right = anchor;
            cell.left = anchor_left;
        }
        self.cells[anchor_left].right = key;
        self.cells[anchor].left = key;
    }

    /// Removes `key` from its ring and leaves it as a singleton.
    ///
    /// Returns another member of the old ring, or `None` if `key` was alone.
    pub(crate) fn unlink(&mut self, key: CellKey) -> Option<CellKey> {
        let (left, right) = {
            let cell = &self.cells[key];
            (cell.left, cell.right)
        };
        if right == key {
            return None;
        }
        self.cells[left].right = right;
        self.cells[right].left = left;
        let cell = &mut self.cells[key];
        cell.left = key;
        cell.right = key;
        Some(right)
    }

    /// Joins the ring containing `b` into the ring containing `a`.
    pub(crate) fn concat(&mut self, a: CellKey, b: CellKey) {
        let a_left = self.cells[a].left;
        let b_left = self.cells[b].left;
        self.cells[a_left].right = b;
        self.cells[b].left = a_left;
        self.cells[b_left].right = a;
        self.cells[a].left = b_left;
    }

    /// Collects the members of `start`'s ring, beginning at `start`.
    pub(crate) fn ring(&self, start: CellKey) -> Vec<CellKey> {
        let mut members = vec![start];
        let mut current = self.cells[start].right;
        while current != start {
            members.push(current);
            current = self.cells[current].right;
        }
        members
    }

    /// Moves every cell of `other` into this arena.
    ///
    /// Returns the old-key to new-key mapping. All links inside the moved
    /// cells are rewritten to the new keys.
    pub(crate) fn absorb(&mut self, mut other: CellArena<P, V>) -> FxHashMap<CellKey, CellKey> {
        let mut remap =
            FxHashMap::with_capacity_and_hasher(other.cells.len(), Default::default());
        let moved: Vec<(CellKey, Cell<P, V>)> = other.cells.drain().collect();
        let mut new_keys = Vec::with_capacity(moved.len());
        for (old_key, cell) in moved {
            let new_key = self.cells.insert(cell);
            remap.insert(old_key, new_key);
            new_keys.push(new_key);
        }
        for key in new_keys {
            let cell = &mut self.cells[key];
            cell.left = remap[&cell.left];
            cell.right = remap[&cell.right];
            cell.parent = cell.parent.map(|p| remap[&p]);
            cell.child = cell.child.map(|c| remap[&c]);
        }
        remap
    }
}
