//! Mutable undirected graph container
//!
//! [`UndirectedGraph`] stores vertices and edges on adjacency lists and
//! supports incremental insertion and removal while keeping its counting and
//! uniqueness invariants. It is independent of the priority queue; algorithms
//! that need both hold both (see [`pathfinding`](crate::pathfinding)).
//!
//! Neither the graph nor its iterators are synchronized. Mutation while an
//! iterator is alive is ruled out by the borrow checker.

pub mod config;
pub mod edge;
pub mod events;
pub mod iter;
mod undirected;

pub use config::GraphConfig;
pub use edge::{Edge, TaggedEdge, UndirectedEdge};
pub use events::{EdgeCallback, SubscriptionId};
pub use iter::{AdjacentEdges, Edges};
pub use undirected::UndirectedGraph;
