//! Single-source shortest paths over an [`UndirectedGraph`].
//!
//! [`dijkstra`] is the canonical client of [`FibonacciQueue`]: the queue owns
//! the tentative distance map, the search writes a shorter distance through
//! [`distances_mut`](FibonacciQueue::distances_mut) and then asks the queue to
//! [`update`](FibonacciQueue::update) the vertex, which is a decrease-key.
//!
//! # Example
//!
//! ```rust
//! use graph_heaps::graph::{TaggedEdge, UndirectedGraph};
//! use graph_heaps::pathfinding::dijkstra;
//!
//! let mut graph: UndirectedGraph<char, TaggedEdge<char, u32>> = UndirectedGraph::new();
//! graph.add_vertex_range(['a', 'b', 'c']);
//! graph.add_edge(TaggedEdge::new('a', 'b', 1)).unwrap();
//! graph.add_edge(TaggedEdge::new('b', 'c', 2)).unwrap();
//! graph.add_edge(TaggedEdge::new('a', 'c', 5)).unwrap();
//!
//! let paths = dijkstra(&graph, &'a', |e| *e.tag()).unwrap();
//! assert_eq!(paths.distance(&'c'), Some(3));
//! assert_eq!(paths.path_to(&'c'), Some(vec!['a', 'b', 'c']));
//! ```

use crate::error::{GraphError, PathError};
use crate::fibonacci_queue::FibonacciQueue;
use crate::graph::{UndirectedEdge, UndirectedGraph};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as path costs.
///
/// `Default` is the zero cost.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Result of a single-source search.
#[derive(Debug, Clone)]
pub struct ShortestPaths<V, E, W> {
    source: V,
    distances: FxHashMap<V, W>,
    predecessors: FxHashMap<V, E>,
}

impl<V, E, W> ShortestPaths<V, E, W>
where
    V: Eq + Hash + Clone,
    E: UndirectedEdge<V>,
    W: Cost,
{
    /// The vertex the search started from.
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Shortest distance from the source, or `None` if `vertex` is unreachable.
    pub fn distance(&self, vertex: &V) -> Option<W> {
        self.distances.get(vertex).copied()
    }

    /// The last edge on the shortest path to `vertex`.
    ///
    /// `None` for the source itself and for unreachable vertices.
    pub fn predecessor(&self, vertex: &V) -> Option<&E> {
        self.predecessors.get(vertex)
    }

    /// Returns true if `vertex` was reached.
    pub fn is_reachable(&self, vertex: &V) -> bool {
        self.distances.contains_key(vertex)
    }

    /// Number of vertices reached, the source included.
    pub fn reached(&self) -> usize {
        self.distances.len()
    }

    /// Vertices from the source to `target`, both inclusive.
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        if !self.is_reachable(target) {
            return None;
        }
        let mut path = vec![target.clone()];
        let mut current = target;
        while *current != self.source {
            let edge = self.predecessors.get(current)?;
            current = edge.other(current)?;
            path.push(current.clone());
        }
        path.reverse();
        Some(path)
    }

    /// Iterates `(vertex, distance)` pairs of every reached vertex.
    pub fn iter(&self) -> impl Iterator<Item = (&V, W)> + '_ {
        self.distances.iter().map(|(v, d)| (v, *d))
    }
}

/// Dijkstra's algorithm from `source`, weighting each edge with `weight`.
///
/// Self-loops never shorten a path and are skipped. Among parallel edges the
/// lightest one wins.
///
/// # Errors
/// - [`PathError::Graph`] with [`GraphError::VertexNotFound`] if `source` is
///   not in the graph
/// - [`PathError::NegativeWeight`] if an edge weighs less than `W::default()`
pub fn dijkstra<V, E, W, F>(
    graph: &UndirectedGraph<V, E>,
    source: &V,
    weight: F,
) -> Result<ShortestPaths<V, E, W>, PathError>
where
    V: Eq + Hash + Clone,
    E: UndirectedEdge<V> + PartialEq + Clone,
    W: Cost,
    F: Fn(&E) -> W,
{
    if !graph.contains_vertex(source) {
        return Err(GraphError::VertexNotFound.into());
    }

    let mut distances: FxHashMap<V, W> = FxHashMap::default();
    distances.insert(source.clone(), W::default());
    let mut queue = FibonacciQueue::from_map(distances);
    queue.enqueue(source.clone())?;

    let mut settled: FxHashSet<V> = FxHashSet::default();
    let mut predecessors: FxHashMap<V, E> = FxHashMap::default();

    while !queue.is_empty() {
        let u = queue.dequeue()?;
        let Some(du) = queue.distances().get(&u).copied() else {
            continue;
        };
        settled.insert(u.clone());

        for edge in graph.adjacent_edges(&u)? {
            let w = weight(edge);
            if w < W::default() {
                return Err(PathError::NegativeWeight);
            }
            let Some(v) = edge.other(&u) else {
                continue;
            };
            if settled.contains(v) {
                continue;
            }
            let candidate = du + w;
            match queue.distances().get(v).copied() {
                None => {
                    queue.distances_mut().insert(v.clone(), candidate);
                    predecessors.insert(v.clone(), edge.clone());
                    queue.enqueue(v.clone())?;
                }
                Some(dv) if candidate < dv => {
                    queue.distances_mut().insert(v.clone(), candidate);
                    predecessors.insert(v.clone(), edge.clone());
                    queue.update(v)?;
                }
                Some(_) => {}
            }
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(settled = settled.len(), "dijkstra finished");

    Ok(ShortestPaths {
        source: source.clone(),
        distances: queue.into_distances(),
        predecessors,
    })
}
