//! Vertex priority queue backed by a Fibonacci heap
//!
//! [`FibonacciQueue`] binds every vertex to at most one heap cell through a
//! lookup table, which gives O(1) membership checks and O(1) amortized
//! `update` (decrease-key) without ever searching the heap.
//!
//! Priorities are not passed in: they are read from the queue's
//! [`DistanceSource`] when a vertex is enqueued or updated. A shortest-path
//! algorithm typically lets the queue own its distance map, records a shorter
//! distance through [`FibonacciQueue::distances_mut`] and then calls
//! [`FibonacciQueue::update`].
//!
//! # Example
//!
//! ```rust
//! use graph_heaps::fibonacci_queue::FibonacciQueue;
//! use std::collections::HashMap;
//!
//! let mut distances = HashMap::new();
//! distances.insert('a', 5u32);
//! distances.insert('b', 2);
//!
//! let mut queue = FibonacciQueue::from_map(distances);
//! queue.enqueue('a').unwrap();
//! queue.enqueue('b').unwrap();
//!
//! queue.distances_mut().insert('a', 1);
//! queue.update(&'a').unwrap();
//! assert_eq!(queue.dequeue(), Ok('a'));
//! ```

use crate::error::{HeapError, QueueError};
use crate::fibonacci::{CellHandle, FibonacciHeap};
use crate::traits::{Comparator, DistanceSource, HeapDirection, Natural, PriorityQueue};
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// State of a vertex in the binding table.
///
/// Pre-declared vertices start `Absent`: their table slot is reserved, but
/// they are not in the heap and `contains` is false until they are enqueued.
/// A dequeued vertex returns to `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Known to the queue but not currently enqueued.
    Absent,
    /// Enqueued, living in the heap cell behind the handle.
    Bound(CellHandle),
}

/// Priority queue over vertices with decrease-key support
///
/// - `V`: vertex type, compared by `Eq + Hash`
/// - `D`: distance (priority) type
/// - `S`: where priorities are read from
/// - `C`: comparator over `D`
pub struct FibonacciQueue<V, D, S, C = Natural> {
    heap: FibonacciHeap<D, V, C>,
    bindings: FxHashMap<V, Binding>,
    distances: S,
}

impl<V, D, S> FibonacciQueue<V, D, S, Natural>
where
    V: Eq + Hash + Clone,
    D: Ord,
    S: DistanceSource<V, D>,
{
    /// Creates an empty queue ordered by `D: Ord`, smallest distance first.
    pub fn new(distances: S) -> Self {
        Self::with_comparator(std::iter::empty(), distances, Natural)
    }

    /// Creates an empty queue with binding slots reserved for `vertices`.
    pub fn with_vertices<I>(vertices: I, distances: S) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        Self::with_comparator(vertices, distances, Natural)
    }
}

impl<V, D, H> FibonacciQueue<V, D, HashMap<V, D, H>, Natural>
where
    V: Eq + Hash + Clone,
    D: Ord + Clone,
    H: BuildHasher,
{
    /// Creates a queue whose priorities come from `map`.
    ///
    /// Every key of `map` is pre-declared. The map is owned by the queue and
    /// stays reachable through [`distances`](Self::distances) and
    /// [`distances_mut`](Self::distances_mut).
    pub fn from_map(map: HashMap<V, D, H>) -> Self {
        Self::from_map_with_comparator(map, Natural)
    }
}

impl<V, D, H, C> FibonacciQueue<V, D, HashMap<V, D, H>, C>
where
    V: Eq + Hash + Clone,
    D: Clone,
    H: BuildHasher,
    C: Comparator<D>,
{
    /// Creates a queue over `map` ordered by a custom comparator.
    pub fn from_map_with_comparator(map: HashMap<V, D, H>, comparator: C) -> Self {
        let vertices: Vec<V> = map.keys().cloned().collect();
        Self::with_comparator(vertices, map, comparator)
    }
}

impl<V, D, S, C> FibonacciQueue<V, D, S, C>
where
    V: Eq + Hash + Clone,
    S: DistanceSource<V, D>,
    C: Comparator<D>,
{
    /// Creates a queue ordered by a custom comparator, smallest first.
    pub fn with_comparator<I>(vertices: I, distances: S, comparator: C) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let vertices = vertices.into_iter();
        let mut bindings =
            FxHashMap::with_capacity_and_hasher(vertices.size_hint().0, Default::default());
        for vertex in vertices {
            bindings.insert(vertex, Binding::Absent);
        }
        Self {
            heap: FibonacciHeap::with_comparator(HeapDirection::Increasing, comparator),
            bindings,
            distances,
        }
    }

    /// Number of enqueued vertices.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no vertex is enqueued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns true if `vertex` is currently enqueued.
    pub fn contains(&self, vertex: &V) -> bool {
        matches!(self.bindings.get(vertex), Some(Binding::Bound(_)))
    }

    /// The binding table entry of `vertex`, if the queue knows it.
    pub fn binding(&self, vertex: &V) -> Option<&Binding> {
        self.bindings.get(vertex)
    }

    /// Enqueues `vertex` at the priority its distance source reports.
    ///
    /// # Errors
    /// - [`QueueError::AlreadyEnqueued`] if the vertex is live in the queue
    /// - [`QueueError::UnknownVertex`] if the distance source has no priority
    pub fn enqueue(&mut self, vertex: V) -> Result<(), QueueError> {
        if self.contains(&vertex) {
            return Err(QueueError::AlreadyEnqueued);
        }
        let priority = self
            .distances
            .distance(&vertex)
            .ok_or(QueueError::UnknownVertex)?;
        let handle = self.heap.insert(priority, vertex.clone());
        self.bindings.insert(vertex, Binding::Bound(handle));

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.heap.len(), "enqueued vertex");
        Ok(())
    }

    /// Removes and returns the vertex with the smallest priority.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if no vertex is enqueued.
    pub fn dequeue(&mut self) -> Result<V, QueueError> {
        let (_, vertex) = self.heap.extract_min().map_err(|err| match err {
            HeapError::Empty => QueueError::Empty,
            other => QueueError::Heap(other),
        })?;
        match self.bindings.get_mut(&vertex) {
            Some(binding) => *binding = Binding::Absent,
            None => panic!("dequeued vertex has no binding"),
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.heap.len(), "dequeued vertex");
        Ok(vertex)
    }

    /// Returns the vertex with the smallest priority without removing it.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if no vertex is enqueued.
    pub fn peek(&self) -> Result<&V, QueueError> {
        self.heap
            .find_min()
            .map(|(_, vertex)| vertex)
            .ok_or(QueueError::Empty)
    }

    /// Re-reads the priority of an enqueued vertex and applies decrease-key.
    ///
    /// Callers must only update after recording a priority that is not
    /// greater than the enqueued one; shortest-path algorithms do this when
    /// they find a shorter distance.
    ///
    /// # Errors
    /// - [`QueueError::NotEnqueued`] if the vertex is not bound to a cell
    /// - [`QueueError::UnknownVertex`] if the distance source has no priority
    /// - [`QueueError::PriorityIncreased`] if the new priority is greater;
    ///   the queue is unchanged
    pub fn update(&mut self, vertex: &V) -> Result<(), QueueError> {
        let handle = match self.bindings.get(vertex) {
            Some(Binding::Bound(handle)) => *handle,
            _ => return Err(QueueError::NotEnqueued),
        };
        let priority = self
            .distances
            .distance(vertex)
            .ok_or(QueueError::UnknownVertex)?;
        self.heap
            .decrease_key(handle, priority)
            .map_err(|err| match err {
                HeapError::PriorityNotDecreased => QueueError::PriorityIncreased,
                other => QueueError::Heap(other),
            })?;

        #[cfg(feature = "tracing")]
        tracing::trace!("updated vertex priority");
        Ok(())
    }

    /// The priority `vertex` is currently enqueued at.
    pub fn priority(&self, vertex: &V) -> Option<&D> {
        match self.bindings.get(vertex) {
            Some(Binding::Bound(handle)) => self.heap.priority(*handle),
            _ => None,
        }
    }

    /// Iterates enqueued vertices in heap-internal (unsorted) order.
    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.heap.iter().map(|(_, vertex)| vertex)
    }

    /// Snapshot of enqueued vertices in heap-internal (unsorted) order.
    ///
    /// Intended for diagnostics; use [`dequeue`](Self::dequeue) for ordered access.
    pub fn to_vec(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }

    /// Empties the queue. Known vertices stay in the table as `Absent`.
    pub fn clear(&mut self) {
        self.heap.clear();
        for binding in self.bindings.values_mut() {
            *binding = Binding::Absent;
        }
    }

    /// The distance source priorities are read from.
    pub fn distances(&self) -> &S {
        &self.distances
    }

    /// Mutable access to the distance source.
    ///
    /// Changing a distance has no effect on the queue until the vertex is
    /// enqueued or [`update`](Self::update)d.
    pub fn distances_mut(&mut self) -> &mut S {
        &mut self.distances
    }

    /// Releases the queue, returning its distance source.
    pub fn into_distances(self) -> S {
        self.distances
    }
}

impl<V, D, S, C> PriorityQueue<V> for FibonacciQueue<V, D, S, C>
where
    V: Eq + Hash + Clone,
    S: DistanceSource<V, D>,
    C: Comparator<D>,
{
    fn len(&self) -> usize {
        FibonacciQueue::len(self)
    }

    fn contains(&self, vertex: &V) -> bool {
        FibonacciQueue::contains(self, vertex)
    }

    fn enqueue(&mut self, vertex: V) -> Result<(), QueueError> {
        FibonacciQueue::enqueue(self, vertex)
    }

    fn dequeue(&mut self) -> Result<V, QueueError> {
        FibonacciQueue::dequeue(self)
    }

    fn peek(&self) -> Result<&V, QueueError> {
        FibonacciQueue::peek(self)
    }

    fn update(&mut self, vertex: &V) -> Result<(), QueueError> {
        FibonacciQueue::update(self, vertex)
    }

    fn to_vec(&self) -> Vec<V> {
        FibonacciQueue::to_vec(self)
    }
}

impl<V, D, S, C: Comparator<D>> std::fmt::Debug for FibonacciQueue<V, D, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FibonacciQueue")
            .field("len", &self.heap.len())
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_over(pairs: &[(char, u32)]) -> FibonacciQueue<char, u32, HashMap<char, u32>> {
        FibonacciQueue::from_map(pairs.iter().copied().collect())
    }

    #[test]
    fn test_dequeue_in_priority_order() {
        let mut queue = queue_over(&[('a', 5), ('b', 2), ('c', 8)]);
        for v in ['a', 'b', 'c'] {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Ok('b'));
        assert_eq!(queue.dequeue(), Ok('a'));
        assert_eq!(queue.dequeue(), Ok('c'));
        assert_eq!(queue.dequeue(), Err(QueueError::Empty));
    }

    #[test]
    fn test_predeclared_vertices_are_absent() {
        let mut queue = queue_over(&[('a', 1), ('b', 2)]);
        assert!(!queue.contains(&'a'));
        assert_eq!(queue.binding(&'a'), Some(&Binding::Absent));
        assert_eq!(queue.binding(&'z'), None);
        assert_eq!(queue.update(&'a'), Err(QueueError::NotEnqueued));

        queue.enqueue('a').unwrap();
        assert!(queue.contains(&'a'));
        assert!(matches!(queue.binding(&'a'), Some(Binding::Bound(_))));
    }

    #[test]
    fn test_dequeue_reverts_binding() {
        let mut queue = queue_over(&[('a', 1)]);
        queue.enqueue('a').unwrap();
        assert_eq!(queue.dequeue(), Ok('a'));
        assert!(!queue.contains(&'a'));
        assert_eq!(queue.binding(&'a'), Some(&Binding::Absent));
        assert_eq!(queue.update(&'a'), Err(QueueError::NotEnqueued));

        // A dequeued vertex can be enqueued again
        queue.enqueue('a').unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_twice_rejected() {
        let mut queue = queue_over(&[('a', 1)]);
        queue.enqueue('a').unwrap();
        assert_eq!(queue.enqueue('a'), Err(QueueError::AlreadyEnqueued));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_unknown_vertex_propagates() {
        let mut queue = queue_over(&[('a', 1)]);
        assert_eq!(queue.enqueue('x'), Err(QueueError::UnknownVertex));
        assert!(queue.is_empty());
        assert_eq!(queue.binding(&'x'), None);
    }

    #[test]
    fn test_update_rejects_increase() {
        let mut queue = queue_over(&[('a', 4), ('b', 6)]);
        queue.enqueue('a').unwrap();
        queue.enqueue('b').unwrap();

        queue.distances_mut().insert('a', 9);
        assert_eq!(queue.update(&'a'), Err(QueueError::PriorityIncreased));
        assert_eq!(queue.priority(&'a'), Some(&4));
        assert_eq!(queue.peek(), Ok(&'a'));
    }

    #[test]
    fn test_closure_source_and_peek() {
        let mut queue: FibonacciQueue<u32, u32, _> =
            FibonacciQueue::new(|v: &u32| if *v < 100 { Some(100 - *v) } else { None });
        queue.enqueue(10).unwrap();
        queue.enqueue(60).unwrap();
        assert_eq!(queue.peek(), Ok(&60));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.enqueue(500), Err(QueueError::UnknownVertex));
    }

    #[test]
    fn test_custom_comparator_max_first() {
        let map: HashMap<char, u32> = [('a', 1), ('b', 7)].into_iter().collect();
        let mut queue = FibonacciQueue::from_map_with_comparator(map, |a: &u32, b: &u32| b.cmp(a));
        queue.enqueue('a').unwrap();
        queue.enqueue('b').unwrap();
        assert_eq!(queue.dequeue(), Ok('b'));
    }

    #[test]
    fn test_to_vec_and_clear() {
        let mut queue = queue_over(&[('a', 1), ('b', 2), ('c', 3)]);
        for v in ['a', 'b', 'c'] {
            queue.enqueue(v).unwrap();
        }
        let mut snapshot = queue.to_vec();
        snapshot.sort();
        assert_eq!(snapshot, vec!['a', 'b', 'c']);

        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.binding(&'b'), Some(&Binding::Absent));
        assert_eq!(queue.peek(), Err(QueueError::Empty));
    }

    #[test]
    fn test_debug_reports_sizes() {
        let mut queue = queue_over(&[('a', 1), ('b', 2), ('c', 3)]);
        queue.enqueue('a').unwrap();
        queue.enqueue('c').unwrap();
        let shown = format!("{:?}", queue);
        assert!(shown.contains("len: 2"));
        assert!(shown.contains("bindings: 3"));
    }

    #[test]
    #[should_panic(expected = "dequeued vertex has no binding")]
    fn test_dequeue_panics_on_missing_binding() {
        let mut queue = queue_over(&[('a', 1)]);
        queue.enqueue('a').unwrap();
        queue.bindings.remove(&'a');
        let _ = queue.dequeue();
    }
}
