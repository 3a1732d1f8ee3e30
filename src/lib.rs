//! Fibonacci-heap priority queues and a mutable undirected graph
//!
//! The pieces build on each other:
//!
//! - [`FibonacciHeap`]: a mergeable heap with O(1) amortized insert and
//!   decrease-key and O(log n) amortized extract-min, over an arena of cells.
//!   Ordering is a pluggable [`Comparator`] plus a [`HeapDirection`].
//! - [`FibonacciQueue`]: a vertex priority queue on top of the heap. Priorities
//!   are read from a [`DistanceSource`] rather than passed in, and `update`
//!   re-reads them as a decrease-key.
//! - [`UndirectedGraph`]: vertices and edges on adjacency lists, with a
//!   parallel-edge policy and edge-added/edge-removed notifications.
//! - [`pathfinding::dijkstra`]: single-source shortest paths joining the two.
//!
//! # Example
//!
//! ```rust
//! use graph_heaps::FibonacciQueue;
//! use std::collections::HashMap;
//!
//! let distances: HashMap<&str, u32> = [("a", 5), ("b", 2), ("c", 8)].into_iter().collect();
//! let mut queue = FibonacciQueue::from_map(distances);
//! for v in ["a", "b", "c"] {
//!     queue.enqueue(v).unwrap();
//! }
//!
//! queue.distances_mut().insert("c", 1);
//! queue.update(&"c").unwrap();
//!
//! assert_eq!(queue.dequeue(), Ok("c"));
//! assert_eq!(queue.dequeue(), Ok("b"));
//! assert_eq!(queue.dequeue(), Ok("a"));
//! ```
//!
//! # Features
//!
//! - `tracing` (default): emits `trace`/`debug` events through the `tracing` crate.
//! - `serde`: `Serialize`/`Deserialize` for edges and [`graph::GraphConfig`].

pub mod error;
pub mod fibonacci;
pub mod fibonacci_queue;
pub mod graph;
pub mod pathfinding;
mod storage;
pub mod traits;

pub use error::{GraphError, HeapError, PathError, QueueError};
pub use fibonacci::{CellHandle, FibonacciHeap};
pub use fibonacci_queue::{Binding, FibonacciQueue};
pub use graph::{Edge, UndirectedEdge, UndirectedGraph};
pub use traits::{Comparator, DistanceSource, HeapDirection, Natural, PriorityQueue};
