//! Mutable undirected graph on adjacency lists
//!
//! # Layout
//!
//! - Edges live in a [`SlotMap`] arena. The arena key is the edge's identity,
//!   so two equal edge values added twice (parallel edges) are two edges.
//! - Each vertex maps to an adjacency list of edge keys. Every edge key appears
//!   once in the list of each endpoint, or twice in the one list of a self-loop.
//! - `edge_count` is maintained incrementally by every mutation.
//!
//! # Preconditions
//!
//! Operations that need a vertex to be a member fail with
//! [`GraphError::VertexNotFound`] (or [`GraphError::EdgeEndpointMissing`] for
//! edge insertion). Removal is tolerant: removing something absent returns
//! `false`. All checks run before the first mutation.

use super::config::GraphConfig;
use super::edge::UndirectedEdge;
use super::events::{EdgeEvent, EdgeEvents, SubscriptionId};
use super::iter::{AdjacentEdges, Edges};
use crate::error::GraphError;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

new_key_type! {
    /// Identity of an edge inside one graph.
    pub(crate) struct EdgeKey;
}

/// Edge keys incident to one vertex.
pub(crate) type AdjacencyList = SmallVec<[EdgeKey; 4]>;

/// Removes the first occurrence of `key`, keeping the order of the rest.
fn remove_one(list: &mut AdjacencyList, key: EdgeKey) -> bool {
    match list.iter().position(|k| *k == key) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

fn occurrences(list: Option<&AdjacencyList>, key: EdgeKey) -> usize {
    list.map_or(0, |l| l.iter().filter(|k| **k == key).count())
}

/// Mutable undirected graph
///
/// # Example
///
/// ```rust
/// use graph_heaps::graph::{Edge, UndirectedGraph};
///
/// let mut graph = UndirectedGraph::new();
/// graph.add_vertex("a").unwrap();
/// graph.add_vertex("b").unwrap();
/// assert_eq!(graph.add_edge(Edge::new("a", "b")), Ok(true));
///
/// assert!(graph.contains_edge(&"b", &"a"));
/// assert_eq!(graph.adjacent_degree(&"a"), Ok(1));
/// assert!(graph.remove_vertex(&"b"));
/// assert_eq!(graph.edge_count(), 0);
/// ```
pub struct UndirectedGraph<V, E> {
    adjacency: FxHashMap<V, AdjacencyList>,
    edges: SlotMap<EdgeKey, E>,
    edge_count: usize,
    config: GraphConfig,
    events: EdgeEvents<E>,
}

impl<V, E> UndirectedGraph<V, E>
where
    V: Eq + Hash + Clone,
    E: UndirectedEdge<V> + PartialEq,
{
    /// Creates an empty graph that allows parallel edges.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Creates an empty graph with the given options.
    pub fn with_config(config: GraphConfig) -> Self {
        UndirectedGraph {
            adjacency: FxHashMap::with_capacity_and_hasher(
                config.vertex_capacity,
                Default::default(),
            ),
            edges: SlotMap::with_capacity_and_key(config.edge_capacity),
            edge_count: 0,
            config,
            events: EdgeEvents::default(),
        }
    }

    /// Options the graph was created with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Always false.
    pub fn is_directed(&self) -> bool {
        false
    }

    /// Returns true if edges between the same vertex pair may repeat.
    pub fn allow_parallel_edges(&self) -> bool {
        self.config.allow_parallel_edges
    }

    // ========================================================================
    // Vertices
    // ========================================================================

    /// Number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no vertices.
    pub fn is_vertices_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Returns true if `vertex` is in the graph.
    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Iterates the vertex set in unspecified order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    /// Adds an isolated vertex.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexExists`] if the vertex is already a member.
    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError> {
        if self.adjacency.contains_key(&vertex) {
            return Err(GraphError::VertexExists);
        }
        self.adjacency.insert(vertex, AdjacencyList::new());

        #[cfg(feature = "tracing")]
        tracing::trace!(vertices = self.adjacency.len(), "added vertex");
        Ok(())
    }

    /// Adds every vertex that is not already a member, returning how many were added.
    pub fn add_vertex_range<I>(&mut self, vertices: I) -> usize
    where
        I: IntoIterator<Item = V>,
    {
        let mut added = 0;
        for vertex in vertices {
            if self.add_vertex(vertex).is_ok() {
                added += 1;
            }
        }
        added
    }

    /// Removes a vertex and every edge incident to it.
    ///
    /// Returns false if the vertex is not a member.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        if !self.adjacency.contains_key(vertex) {
            return false;
        }
        self.clear_incident(vertex);
        self.adjacency.remove(vertex);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            vertices = self.adjacency.len(),
            edges = self.edge_count,
            "removed vertex"
        );
        true
    }

    /// Removes every vertex matching `predicate`, returning how many were removed.
    ///
    /// The vertex set is snapshotted before the first removal, so the predicate
    /// sees every original vertex exactly once.
    pub fn remove_vertex_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let doomed: Vec<V> = self
            .adjacency
            .keys()
            .filter(|v| predicate(v))
            .cloned()
            .collect();
        for vertex in &doomed {
            self.remove_vertex(vertex);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(removed = doomed.len(), "removed vertices by predicate");
        doomed.len()
    }

    // ========================================================================
    // Edges
    // ========================================================================

    /// Number of edges in the graph; a self-loop counts once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no edges.
    pub fn is_edges_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// Iterates every edge exactly once.
    ///
    /// The sequence is lazy and restartable: each call makes a fresh
    /// de-duplicating pass over the adjacency lists.
    pub fn edges(&self) -> Edges<'_, V, E> {
        Edges::new(self.adjacency.values(), &self.edges)
    }

    /// Adds an edge between two existing vertices.
    ///
    /// Returns `Ok(false)`, leaving the graph unchanged, when parallel edges are
    /// disallowed and the endpoints are already joined. A self-loop is stored
    /// twice in its vertex's adjacency list.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeEndpointMissing`] if either endpoint is not a member.
    pub fn add_edge(&mut self, edge: E) -> Result<bool, GraphError> {
        if !self.adjacency.contains_key(edge.source())
            || !self.adjacency.contains_key(edge.target())
        {
            return Err(GraphError::EdgeEndpointMissing);
        }
        Ok(self.insert_checked(edge))
    }

    /// Adds an edge, first inserting whichever endpoints are missing.
    ///
    /// Returns false only when the parallel-edge policy rejects the edge; the
    /// endpoints stay inserted in that case.
    pub fn add_vertices_and_edge(&mut self, edge: E) -> bool {
        for endpoint in [edge.source(), edge.target()] {
            if !self.adjacency.contains_key(endpoint) {
                self.adjacency.insert(endpoint.clone(), AdjacencyList::new());
            }
        }
        self.insert_checked(edge)
    }

    /// Adds a batch of edges, returning how many were actually added.
    ///
    /// # Errors
    /// Returns [`GraphError::EdgeEndpointMissing`] if any edge has an endpoint
    /// outside the graph. Every endpoint is checked before the first insertion,
    /// so on error no edge of the batch has been added.
    pub fn add_edge_range<I>(&mut self, edges: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = E>,
    {
        let edges: Vec<E> = edges.into_iter().collect();
        let all_present = edges.iter().all(|e| {
            self.adjacency.contains_key(e.source()) && self.adjacency.contains_key(e.target())
        });
        if !all_present {
            return Err(GraphError::EdgeEndpointMissing);
        }
        Ok(edges
            .into_iter()
            .filter_map(|e| self.insert_checked(e).then_some(()))
            .count())
    }

    /// Returns true if an edge joins `source` and `target`, in either orientation.
    ///
    /// Scans `source`'s adjacency list; false if `source` is not a member.
    pub fn contains_edge(&self, source: &V, target: &V) -> bool {
        self.adjacency.get(source).is_some_and(|list| {
            list.iter()
                .any(|key| self.edges.get(*key).is_some_and(|e| e.connects(source, target)))
        })
    }

    /// Returns true if an edge equal to `edge` is stored.
    pub fn contains_edge_value(&self, edge: &E) -> bool {
        self.find_edge(edge).is_some()
    }

    /// Removes one edge equal to `edge`.
    ///
    /// Returns false, with no side effects, if no such edge is stored.
    pub fn remove_edge(&mut self, edge: &E) -> bool {
        match self.find_edge(edge) {
            Some(key) => {
                self.detach(key);
                true
            }
            None => false,
        }
    }

    /// Removes every edge matching `predicate`, returning how many were removed.
    pub fn remove_edge_if<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&E) -> bool,
    {
        let doomed: Vec<EdgeKey> = self
            .edges
            .iter()
            .filter(|&(_, e)| predicate(e))
            .map(|(key, _)| key)
            .collect();
        for key in &doomed {
            self.detach(*key);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(removed = doomed.len(), "removed edges by predicate");
        doomed.len()
    }

    /// Removes every edge incident to `vertex` that matches `predicate`.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] if the vertex is not a member.
    pub fn remove_adjacent_edge_if<F>(&mut self, vertex: &V, mut predicate: F) -> Result<usize, GraphError>
    where
        F: FnMut(&E) -> bool,
    {
        let list = self.adjacency.get(vertex).ok_or(GraphError::VertexNotFound)?;
        let mut seen = FxHashSet::default();
        let doomed: Vec<EdgeKey> = list
            .iter()
            .copied()
            .filter(|key| seen.insert(*key))
            .filter(|key| self.edges.get(*key).is_some_and(&mut predicate))
            .collect();
        for key in &doomed {
            self.detach(*key);
        }
        Ok(doomed.len())
    }

    /// Removes one stored edge per item, returning how many were removed.
    pub fn remove_edges<'e, I>(&mut self, edges: I) -> usize
    where
        I: IntoIterator<Item = &'e E>,
        E: 'e,
    {
        edges.into_iter().filter(|e| self.remove_edge(e)).count()
    }

    /// Removes every edge incident to `vertex`; the vertex itself stays.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexNotFound`] if the vertex is not a member.
    pub fn clear_adjacent_edges(&mut self, vertex: &V) -> Result<(), GraphError> {
        if !self.adjacency.contains_key(vertex) {
            return Err(GraphError::VertexNotFound);
        }
        self.clear_incident(vertex);
        Ok(())
    }

    // ========================================================================
    // Adjacency
    // ========================================================================

    fn adjacency_of(&self, vertex: &V) -> Result<&AdjacencyList, GraphError> {
        self.adjacency.get(vertex).ok_or(GraphError::VertexNotFound)
    }

    /// Edges incident to `vertex`; a self-loop is listed twice.
    pub fn adjacent_edges(&self, vertex: &V) -> Result<AdjacentEdges<'_, E>, GraphError> {
        Ok(AdjacentEdges::new(self.adjacency_of(vertex)?, &self.edges))
    }

    /// The `index`-th entry of `vertex`'s adjacency list.
    pub fn adjacent_edge(&self, vertex: &V, index: usize) -> Result<Option<&E>, GraphError> {
        Ok(self
            .adjacency_of(vertex)?
            .get(index)
            .and_then(|key| self.edges.get(*key)))
    }

    /// Length of `vertex`'s adjacency list; a self-loop counts twice.
    pub fn adjacent_degree(&self, vertex: &V) -> Result<usize, GraphError> {
        Ok(self.adjacency_of(vertex)?.len())
    }

    /// Returns true if no edge touches `vertex`.
    pub fn is_adjacent_edges_empty(&self, vertex: &V) -> Result<bool, GraphError> {
        Ok(self.adjacency_of(vertex)?.is_empty())
    }

    // ========================================================================
    // Whole-graph operations
    // ========================================================================

    /// Releases spare capacity held by the adjacency lists.
    pub fn trim_edge_excess(&mut self) {
        for list in self.adjacency.values_mut() {
            list.shrink_to_fit();
        }
    }

    /// Removes every vertex and edge. No edge-removed notification fires.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.edges.clear();
        self.edge_count = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!("cleared graph");
    }

    // ========================================================================
    // Notification
    // ========================================================================

    /// Registers a callback fired after each edge insertion.
    pub fn on_edge_added<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        self.events.subscribe(EdgeEvent::Added, Box::new(callback))
    }

    /// Registers a callback fired after each edge removal, including removals
    /// cascading from vertex removal.
    pub fn on_edge_removed<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        self.events.subscribe(EdgeEvent::Removed, Box::new(callback))
    }

    /// Drops a registered callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Number of registered edge callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.events.len()
    }

    // ========================================================================
    // Consistency
    // ========================================================================

    /// Full scan of the adjacency structure.
    ///
    /// Verifies that the vertex set matches the adjacency table, that every
    /// edge sits in exactly its endpoints' lists, that `edge_count` matches
    /// both the arena and de-duplicated iteration, that no list refers to a
    /// removed edge, and the parallel-edge policy.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.edge_count != self.edges.len() {
            return Err(format!(
                "edge count {} but {} stored edges",
                self.edge_count,
                self.edges.len()
            ));
        }

        let iterated = self.edges().count();
        if iterated != self.edge_count {
            return Err(format!(
                "edge count {} but iteration yields {}",
                self.edge_count, iterated
            ));
        }

        let mut entries = 0usize;
        for list in self.adjacency.values() {
            for key in list {
                if !self.edges.contains_key(*key) {
                    return Err("adjacency list refers to a removed edge".to_string());
                }
            }
            entries += list.len();
        }
        if entries != 2 * self.edge_count {
            return Err(format!(
                "{} adjacency entries for {} edges",
                entries, self.edge_count
            ));
        }

        for (key, edge) in self.edges.iter() {
            let (s, t) = (edge.source(), edge.target());
            if !self.adjacency.contains_key(s) || !self.adjacency.contains_key(t) {
                return Err("edge endpoint is not a vertex".to_string());
            }
            let in_place = if s == t {
                occurrences(self.adjacency.get(s), key) == 2
            } else {
                occurrences(self.adjacency.get(s), key) == 1
                    && occurrences(self.adjacency.get(t), key) == 1
            };
            if !in_place {
                return Err("edge is not stored once per endpoint".to_string());
            }
        }

        if !self.config.allow_parallel_edges {
            for (key, edge) in self.edges.iter() {
                let parallel = self.adjacency[edge.source()].iter().any(|other| {
                    *other != key && self.edges[*other].connects(edge.source(), edge.target())
                });
                if parallel {
                    return Err("parallel edge stored while disallowed".to_string());
                }
            }
        }
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Key of the first edge in the source list equal to `edge`.
    fn find_edge(&self, edge: &E) -> Option<EdgeKey> {
        self.adjacency
            .get(edge.source())?
            .iter()
            .copied()
            .find(|key| self.edges.get(*key).is_some_and(|e| e == edge))
    }

    /// Applies the parallel-edge policy, then links the edge into both lists.
    ///
    /// Both endpoints must already be members.
    fn insert_checked(&mut self, edge: E) -> bool {
        if !self.config.allow_parallel_edges && self.contains_edge(edge.source(), edge.target()) {
            return false;
        }

        let key = self.edges.insert(edge);
        let edge = &self.edges[key];
        if let Some(list) = self.adjacency.get_mut(edge.source()) {
            list.push(key);
        }
        if let Some(list) = self.adjacency.get_mut(edge.target()) {
            list.push(key);
        }
        self.edge_count += 1;
        self.events.notify(EdgeEvent::Added, edge);

        #[cfg(feature = "tracing")]
        tracing::trace!(edges = self.edge_count, "added edge");
        true
    }

    /// Unlinks a stored edge from both endpoint lists and frees it.
    ///
    /// Panics if the edge is not recorded once in each endpoint list; that
    /// means the adjacency structure is corrupt.
    fn detach(&mut self, key: EdgeKey) -> Option<E> {
        let edge = self.edges.get(key)?;
        let (s, t) = (edge.source(), edge.target());
        let in_place = if s == t {
            occurrences(self.adjacency.get(s), key) == 2
        } else {
            occurrences(self.adjacency.get(s), key) == 1
                && occurrences(self.adjacency.get(t), key) == 1
        };
        assert!(in_place, "adjacency lists out of sync for a stored edge");

        if let Some(list) = self.adjacency.get_mut(s) {
            remove_one(list, key);
        }
        let removed = self
            .adjacency
            .get_mut(t)
            .is_some_and(|list| remove_one(list, key));
        if !removed {
            return None;
        }

        let edge = self.edges.remove(key)?;
        self.decrement_edge_count();
        self.events.notify(EdgeEvent::Removed, &edge);

        #[cfg(feature = "tracing")]
        tracing::trace!(edges = self.edge_count, "removed edge");
        Some(edge)
    }

    /// Removes every edge incident to `vertex`, leaving its list empty.
    fn clear_incident(&mut self, vertex: &V) {
        let Some(list) = self.adjacency.get_mut(vertex) else {
            return;
        };
        let keys = std::mem::take(list);
        for key in keys {
            // The second entry of a self-loop finds the edge already freed
            let Some(edge) = self.edges.remove(key) else {
                continue;
            };
            if let Some(other) = edge.other(vertex) {
                if other != vertex {
                    if let Some(list) = self.adjacency.get_mut(other) {
                        remove_one(list, key);
                    }
                }
            }
            self.decrement_edge_count();
            self.events.notify(EdgeEvent::Removed, &edge);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(edges = self.edge_count, "cleared adjacent edges");
    }

    fn decrement_edge_count(&mut self) {
        assert!(self.edge_count > 0, "edge count would become negative");
        self.edge_count -= 1;
    }
}

impl<V, E> Default for UndirectedGraph<V, E>
where
    V: Eq + Hash + Clone,
    E: UndirectedEdge<V> + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> fmt::Debug for UndirectedGraph<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndirectedGraph")
            .field("vertex_count", &self.adjacency.len())
            .field("edge_count", &self.edge_count)
            .field("allow_parallel_edges", &self.config.allow_parallel_edges)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn path_graph() -> UndirectedGraph<char, Edge<char>> {
        let mut graph = UndirectedGraph::with_config(GraphConfig::default().parallel_edges(false));
        for v in ['a', 'b', 'c'] {
            graph.add_vertex(v).unwrap();
        }
        graph.add_edge(Edge::new('a', 'b')).unwrap();
        graph.add_edge(Edge::new('b', 'c')).unwrap();
        graph
    }

    #[test]
    fn test_path_graph_counts() {
        let graph = path_graph();
        assert_eq!(graph.edge_count(), 2);
        assert!(!graph.contains_edge(&'a', &'c'));
        assert_eq!(graph.adjacent_degree(&'b'), Ok(2));
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_self_loop_stored_twice() {
        let mut graph: UndirectedGraph<u8, Edge<u8>> = UndirectedGraph::new();
        graph.add_vertex(1).unwrap();
        assert_eq!(graph.add_edge(Edge::new(1, 1)), Ok(true));
        assert_eq!(graph.adjacent_degree(&1), Ok(2));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().count(), 1);
        graph.check_invariants().unwrap();

        assert!(graph.remove_edge(&Edge::new(1, 1)));
        assert_eq!(graph.adjacent_degree(&1), Ok(0));
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_clear_incident_counts_self_loop_once() {
        let mut graph: UndirectedGraph<u8, Edge<u8>> = UndirectedGraph::new();
        graph.add_vertices_and_edge(Edge::new(1, 1));
        graph.add_vertices_and_edge(Edge::new(1, 2));
        graph.add_vertices_and_edge(Edge::new(2, 3));
        assert_eq!(graph.edge_count(), 3);

        graph.clear_adjacent_edges(&1).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains_vertex(&1));
        assert_eq!(graph.is_adjacent_edges_empty(&1), Ok(true));
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_remove_missing_edge_is_tolerant() {
        let mut graph = path_graph();
        assert!(!graph.remove_edge(&Edge::new('a', 'c')));
        assert!(!graph.remove_edge(&Edge::new('x', 'y')));
        assert_eq!(graph.edge_count(), 2);
        graph.check_invariants().unwrap();
    }

    #[test]
    fn test_detach_panics_on_desync() {
        let mut graph = path_graph();
        let key = graph.find_edge(&Edge::new('a', 'b')).unwrap();
        if let Some(list) = graph.adjacency.get_mut(&'b') {
            remove_one(list, key);
        }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            graph.remove_edge(&Edge::new('a', 'b'));
        }));
        assert!(result.is_err());
    }
}
