//! Error types for heap, queue and graph operations.
//!
//! Every fallible operation in this crate checks its preconditions before it
//! touches any state, so an `Err` always means the structure is unchanged.
//! Internal invariant violations are not represented here: they indicate a bug
//! in this crate and panic instead.

use thiserror::Error;

/// Errors reported by [`FibonacciHeap`](crate::fibonacci::FibonacciHeap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The heap has no elements.
    #[error("heap is empty")]
    Empty,
    /// The new priority compares greater than the current priority.
    #[error("new priority is greater than current priority")]
    PriorityNotDecreased,
    /// The handle does not refer to a live cell of this heap.
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
    /// `merge` of two heaps that surface opposite ends of the order.
    #[error("heaps have different directions")]
    DirectionMismatch,
}

/// Errors reported by [`FibonacciQueue`](crate::fibonacci_queue::FibonacciQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `dequeue` or `peek` on an empty queue.
    #[error("queue is empty")]
    Empty,
    /// The distance source has no value for the vertex.
    #[error("distance source has no priority for the vertex")]
    UnknownVertex,
    /// `update` on a vertex that is not currently enqueued.
    #[error("vertex is not enqueued")]
    NotEnqueued,
    /// `enqueue` on a vertex that is already live in the queue.
    #[error("vertex is already enqueued")]
    AlreadyEnqueued,
    /// `update` recomputed a priority greater than the stored one.
    #[error("updated priority is greater than the enqueued priority")]
    PriorityIncreased,
    /// Failure surfaced by the underlying heap.
    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// Errors reported by [`UndirectedGraph`](crate::graph::UndirectedGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// `add_vertex` on a vertex that is already a member.
    #[error("vertex is already in the graph")]
    VertexExists,
    /// The vertex is not a member of the graph.
    #[error("vertex is not a member of the graph")]
    VertexNotFound,
    /// One or both endpoints of the edge are not members of the graph.
    #[error("edge endpoint is not a member of the graph")]
    EdgeEndpointMissing,
}

/// Errors reported by [`dijkstra`](crate::pathfinding::dijkstra).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// An edge weight compares below the zero cost.
    #[error("edge weight is negative")]
    NegativeWeight,
    /// The graph rejected a query, e.g. an unknown source vertex.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The priority queue rejected an operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}
