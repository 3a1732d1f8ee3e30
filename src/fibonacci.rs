//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert, decrease_key, and merge
//! - O(log n) amortized extract_min
//!
//! The structure consists of a collection of heap-ordered trees. Roots are linked
//! in a circular doubly linked list. The heap maintains the minimum root.
//!
//! Cells live in a slot-map arena and are addressed by
//! generational keys, so a [`CellHandle`] that outlives its cell is reported as
//! [`HeapError::InvalidHandle`] instead of aliasing another element.
//!
//! All ordering goes through the heap's [`Comparator`] oriented by its
//! [`HeapDirection`]; the priority type's own `Ord` is only used by [`Natural`].

use crate::error::HeapError;
use crate::storage::{CellArena, CellKey};
use crate::traits::{Comparator, HeapDirection, Natural};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Handle to an element in a Fibonacci heap
///
/// A handle is tied to the heap that returned it. After the element is
/// extracted or deleted, operations taking the handle fail with
/// [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CellHandle {
    key: CellKey,
}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use graph_heaps::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.decrease_key(handle, 1).unwrap();
/// assert_eq!(heap.find_min(), Some((&1, &"item")));
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap<P, V, C = Natural> {
    cells: CellArena<P, V>,
    min: Option<CellKey>,
    comparator: C,
    direction: HeapDirection,
}

impl<P: Ord, V> FibonacciHeap<P, V, Natural> {
    /// Creates an empty min-heap ordered by `P: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(HeapDirection::Increasing, Natural)
    }

    /// Creates an empty heap ordered by `P: Ord` in the given direction.
    pub fn with_direction(direction: HeapDirection) -> Self {
        Self::with_comparator(direction, Natural)
    }
}

impl<P: Ord, V> Default for FibonacciHeap<P, V, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, V, C: Comparator<P>> FibonacciHeap<P, V, C> {
    /// Creates an empty heap using a custom comparator.
    pub fn with_comparator(direction: HeapDirection, comparator: C) -> Self {
        Self {
            cells: CellArena::default(),
            min: None,
            comparator,
            direction,
        }
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The direction this heap was created with.
    pub fn direction(&self) -> HeapDirection {
        self.direction
    }

    /// The comparator this heap orders by.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    #[inline]
    fn ordering(&self, a: &P, b: &P) -> Ordering {
        self.direction.orient(self.comparator.compare(a, b))
    }

    /// True if `a` belongs strictly closer to the top than `b`.
    #[inline]
    fn precedes(&self, a: CellKey, b: CellKey) -> bool {
        self.ordering(&self.cells[a].priority, &self.cells[b].priority) == Ordering::Less
    }

    /// Inserts an element, returning its handle.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, priority: P, value: V) -> CellHandle {
        let key = self.cells.insert(priority, value);
        self.add_root(key);
        CellHandle { key }
    }

    /// Returns the top priority and value without removing them.
    pub fn find_min(&self) -> Option<(&P, &V)> {
        self.min.map(|key| {
            let cell = &self.cells[key];
            (&cell.priority, &cell.value)
        })
    }

    /// Returns the handle of the top element.
    pub fn find_min_handle(&self) -> Option<CellHandle> {
        self.min.map(|key| CellHandle { key })
    }

    /// Removes and returns the top element.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(P, V), HeapError> {
        let min = self.min.ok_or(HeapError::Empty)?;
        self.promote_children(min);

        match self.cells.unlink(min) {
            None => self.min = None,
            Some(start) => self.consolidate(start),
        }

        let cell = self.cells.remove(min).ok_or(HeapError::InvalidHandle)?;
        Ok((cell.priority, cell.value))
    }

    /// Removes and returns the top element, or `None` if empty.
    pub fn pop(&mut self) -> Option<(P, V)> {
        self.extract_min().ok()
    }

    /// Moves an element towards the top by lowering its priority.
    ///
    /// The operation is rejected, with the heap unchanged, when the new
    /// priority compares greater than the current one. An equal priority is
    /// accepted.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the element is no longer in the heap
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is greater
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: CellHandle, new_priority: P) -> Result<(), HeapError> {
        let key = handle.key;
        let cell = self.cells.get(key).ok_or(HeapError::InvalidHandle)?;
        if self.ordering(&new_priority, &cell.priority) == Ordering::Greater {
            return Err(HeapError::PriorityNotDecreased);
        }

        self.cells[key].priority = new_priority;

        let parent = self.cells[key].parent;
        match parent {
            None => {
                if let Some(min) = self.min {
                    if self.precedes(key, min) {
                        self.min = Some(key);
                    }
                }
            }
            Some(parent) => {
                if self.precedes(key, parent) {
                    self.cut(key, parent);
                    self.cascading_cut(parent);
                    if let Some(min) = self.min {
                        if self.precedes(key, min) {
                            self.min = Some(key);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Removes an arbitrary element.
    ///
    /// The cell is treated as if its priority were decreased below every
    /// other priority, then extracted.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element is no longer in the heap.
    pub fn delete(&mut self, handle: CellHandle) -> Result<(P, V), HeapError> {
        let key = handle.key;
        if !self.cells.contains(key) {
            return Err(HeapError::InvalidHandle);
        }
        let parent = self.cells[key].parent;
        if let Some(parent) = parent {
            self.cut(key, parent);
            self.cascading_cut(parent);
        }
        self.min = Some(key);
        self.extract_min()
    }

    /// Merges another heap into this one, consuming the other heap
    ///
    /// Handles issued by `other` must not be used with this heap afterwards.
    ///
    /// # Errors
    /// Returns [`HeapError::DirectionMismatch`] if the heaps surface opposite
    /// ends of the order. Neither heap is modified in that case.
    pub fn merge(&mut self, other: Self) -> Result<(), HeapError> {
        if other.direction != self.direction {
            return Err(HeapError::DirectionMismatch);
        }
        let FibonacciHeap { cells, min, .. } = other;
        let Some(other_min) = min else {
            return Ok(());
        };

        let remap = self.cells.absorb(cells);
        let other_min = remap[&other_min];
        match self.min {
            None => self.min = Some(other_min),
            Some(self_min) => {
                self.cells.concat(self_min, other_min);
                if self.precedes(other_min, self_min) {
                    self.min = Some(other_min);
                }
            }
        }
        Ok(())
    }

    /// Current priority of an element.
    pub fn priority(&self, handle: CellHandle) -> Option<&P> {
        self.cells.get(handle.key).map(|cell| &cell.priority)
    }

    /// Value stored with an element.
    pub fn value(&self, handle: CellHandle) -> Option<&V> {
        self.cells.get(handle.key).map(|cell| &cell.value)
    }

    /// Returns true if the handle refers to an element still in the heap.
    pub fn contains(&self, handle: CellHandle) -> bool {
        self.cells.contains(handle.key)
    }

    /// Removes every element. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.min = None;
    }

    /// Iterates `(priority, value)` pairs in heap-internal order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&P, &V)> {
        self.cells.iter().map(|(_, cell)| (&cell.priority, &cell.value))
    }

    /// Walks the forest and checks every structural invariant.
    ///
    /// Checks heap order, parent links, degrees, marks on roots, the element
    /// count and that the min pointer is a root no other root precedes.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(min) = self.min else {
            return if self.cells.len() == 0 {
                Ok(())
            } else {
                Err(format!("empty root list but {} cells", self.cells.len()))
            };
        };
        if self.cells[min].parent.is_some() {
            return Err("min cell is not a root".to_string());
        }

        let mut seen = 0usize;
        for root in self.cells.ring(min) {
            let cell = &self.cells[root];
            if cell.parent.is_some() {
                return Err("root with a parent link".to_string());
            }
            if cell.marked {
                return Err("marked root".to_string());
            }
            if self.precedes(root, min) {
                return Err("a root precedes the min pointer".to_string());
            }
            seen += self.check_subtree(root)?;
        }

        if seen != self.cells.len() {
            return Err(format!("{} reachable cells, {} allocated", seen, self.cells.len()));
        }
        Ok(())
    }

    fn check_subtree(&self, node: CellKey) -> Result<usize, String> {
        let cell = &self.cells[node];
        let mut count = 1;
        let mut degree = 0;
        if let Some(child) = cell.child {
            for c in self.cells.ring(child) {
                if self.cells[c].parent != Some(node) {
                    return Err("child with wrong parent link".to_string());
                }
                if self.precedes(c, node) {
                    return Err("heap order violated".to_string());
                }
                degree += 1;
                count += self.check_subtree(c)?;
            }
        }
        if degree != cell.degree {
            return Err(format!("degree {} recorded, {} children", cell.degree, degree));
        }
        Ok(count)
    }

    // ========================================================================
    // Forest maintenance
    // ========================================================================

    /// Adds a detached singleton to the root list and updates the min.
    fn add_root(&mut self, key: CellKey) {
        match self.min {
            None => self.min = Some(key),
            Some(min) => {
                self.cells.insert_before(min, key);
                if self.precedes(key, min) {
                    self.min = Some(key);
                }
            }
        }
    }

    /// Moves every child of `key` into the root list.
    fn promote_children(&mut self, key: CellKey) {
        let Some(child) = self.cells[key].child.take() else {
            return;
        };
        for c in self.cells.ring(child) {
            let cell = &mut self.cells[c];
            cell.parent = None;
            cell.marked = false;
        }
        self.cells[key].degree = 0;
        self.cells.concat(key, child);
    }

    /// Links trees of equal degree until all root degrees are distinct.
    fn consolidate(&mut self, start: CellKey) {
        let roots = self.cells.ring(start);
        let mut by_degree: SmallVec<[Option<CellKey>; 64]> = SmallVec::new();

        for root in roots {
            let mut x = root;
            let mut degree = self.cells[x].degree;
            loop {
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(x);
                        break;
                    }
                    Some(mut y) => {
                        if self.precedes(y, x) {
                            std::mem::swap(&mut x, &mut y);
                        }
                        self.link(y, x);
                        degree += 1;
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            degrees = by_degree.len(),
            cells = self.cells.len(),
            "consolidated heap forest"
        );

        self.min = None;
        for root in by_degree.into_iter().flatten() {
            let cell = &mut self.cells[root];
            cell.left = root;
            cell.right = root;
            self.add_root(root);
        }
    }

    /// Makes root `y` a child of root `x`.
    fn link(&mut self, y: CellKey, x: CellKey) {
        self.cells.unlink(y);
        {
            let cell = &mut self.cells[y];
            cell.parent = Some(x);
            cell.marked = false;
        }
        let child = self.cells[x].child;
        match child {
            Some(child) => self.cells.insert_before(child, y),
            None => self.cells[x].child = Some(y),
        }
        self.cells[x].degree += 1;
    }

    /// Cuts `key` from `parent` and adds it to the root list.
    fn cut(&mut self, key: CellKey, parent: CellKey) {
        let sibling = self.cells.unlink(key);
        {
            let p = &mut self.cells[parent];
            if p.child == Some(key) {
                p.child = sibling;
            }
            p.degree -= 1;
        }
        {
            let cell = &mut self.cells[key];
            cell.parent = None;
            cell.marked = false;
        }
        match self.min {
            Some(min) => self.cells.insert_before(min, key),
            None => self.min = Some(key),
        }
    }

    /// Marks `node`, or cuts it and continues upward if it was already marked.
    fn cascading_cut(&mut self, mut node: CellKey) {
        loop {
            let Some(parent) = self.cells[node].parent else {
                return;
            };
            if !self.cells[node].marked {
                self.cells[node].marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }
}
