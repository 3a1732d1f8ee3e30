//! Strategy traits shared by the heap, the queue and their consumers
//!
//! - [`Comparator`]: the single ordering used by a heap. Heaps never fall back
//!   to `Ord` on their own; they compare through this strategy, so callers can
//!   invert the direction or order by a projection of the priority.
//! - [`DistanceSource`]: where a [`FibonacciQueue`](crate::fibonacci_queue::FibonacciQueue)
//!   reads a vertex's priority from.
//! - [`PriorityQueue`]: the vertex-priority contract consumed by graph algorithms.

use crate::error::QueueError;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

/// A tri-state comparison over priorities.
///
/// Any `Fn(&P, &P) -> Ordering` closure is a comparator.
///
/// # Example
///
/// ```rust
/// use graph_heaps::fibonacci::FibonacciHeap;
/// use graph_heaps::traits::HeapDirection;
///
/// // Order by absolute value
/// let mut heap = FibonacciHeap::with_comparator(
///     HeapDirection::Increasing,
///     |a: &i32, b: &i32| a.abs().cmp(&b.abs()),
/// );
/// heap.insert(-1, "a");
/// heap.insert(-7, "b");
/// assert_eq!(heap.find_min(), Some((&-1, &"a")));
/// ```
pub trait Comparator<P> {
    /// Compares two priorities.
    fn compare(&self, a: &P, b: &P) -> Ordering;
}

impl<P, F> Comparator<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}

/// Comparator that uses the priority type's `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<P: Ord> Comparator<P> for Natural {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

/// Which end of the comparator order a heap surfaces first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeapDirection {
    /// Smallest priority first (min-heap).
    #[default]
    Increasing,
    /// Largest priority first (max-heap).
    Decreasing,
}

impl HeapDirection {
    /// Orients a comparator result so that `Less` always means "closer to the top".
    #[inline]
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            HeapDirection::Increasing => ordering,
            HeapDirection::Decreasing => ordering.reverse(),
        }
    }
}

/// Supplies the current priority of a vertex.
///
/// Returning `None` means the vertex is unknown to the source; the queue
/// reports this as [`QueueError::UnknownVertex`].
///
/// Implemented for closures `Fn(&V) -> Option<D>` and for `HashMap<V, D>`.
pub trait DistanceSource<V, D> {
    /// Returns the priority of `vertex`, if known.
    fn distance(&self, vertex: &V) -> Option<D>;
}

impl<V, D, F> DistanceSource<V, D> for F
where
    F: Fn(&V) -> Option<D>,
{
    #[inline]
    fn distance(&self, vertex: &V) -> Option<D> {
        self(vertex)
    }
}

impl<V, D, S> DistanceSource<V, D> for HashMap<V, D, S>
where
    V: Eq + Hash,
    D: Clone,
    S: BuildHasher,
{
    #[inline]
    fn distance(&self, vertex: &V) -> Option<D> {
        self.get(vertex).cloned()
    }
}

/// Vertex priority queue with decrease-key support
///
/// This is the interface shortest-path and spanning-tree algorithms drive:
/// priorities are never passed in directly, they are recomputed from the
/// queue's [`DistanceSource`] at `enqueue` and `update` time.
pub trait PriorityQueue<V> {
    /// Number of live entries.
    fn len(&self) -> usize;

    /// Returns true if no vertex is enqueued.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `vertex` is currently enqueued.
    fn contains(&self, vertex: &V) -> bool;

    /// Enqueues `vertex` at the priority its distance source reports.
    fn enqueue(&mut self, vertex: V) -> Result<(), QueueError>;

    /// Removes and returns the vertex at the top of the queue.
    fn dequeue(&mut self) -> Result<V, QueueError>;

    /// Returns the vertex at the top of the queue without removing it.
    fn peek(&self) -> Result<&V, QueueError>;

    /// Re-reads the priority of an enqueued vertex and moves it up.
    ///
    /// The recomputed priority must not be greater than the enqueued one.
    fn update(&mut self, vertex: &V) -> Result<(), QueueError>;

    /// Snapshot of live vertices in heap-internal (unsorted) order.
    fn to_vec(&self) -> Vec<V>;
}
