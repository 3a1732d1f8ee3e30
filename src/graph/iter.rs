//! Iterators over graph edges.

use super::undirected::{AdjacencyList, EdgeKey};
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use std::collections::hash_map;
use std::iter::FusedIterator;

/// Every edge of the graph exactly once, in adjacency order.
///
/// Each undirected edge is stored in two adjacency lists, so the iterator keeps
/// a marker set of the edges it has already yielded. The set belongs to this
/// iterator only: calling [`edges`](super::UndirectedGraph::edges) again starts
/// a fresh pass.
pub struct Edges<'a, V, E> {
    lists: hash_map::Values<'a, V, AdjacencyList>,
    current: std::slice::Iter<'a, EdgeKey>,
    edges: &'a SlotMap<EdgeKey, E>,
    seen: FxHashSet<EdgeKey>,
}

impl<'a, V, E> Edges<'a, V, E> {
    pub(crate) fn new(
        lists: hash_map::Values<'a, V, AdjacencyList>,
        edges: &'a SlotMap<EdgeKey, E>,
    ) -> Self {
        let empty: &'a [EdgeKey] = &[];
        Edges {
            lists,
            current: empty.iter(),
            edges,
            seen: FxHashSet::with_capacity_and_hasher(edges.len(), Default::default()),
        }
    }
}

impl<'a, V, E> Iterator for Edges<'a, V, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for key in self.current.by_ref() {
                if self.seen.insert(*key) {
                    if let Some(edge) = self.edges.get(*key) {
                        return Some(edge);
                    }
                }
            }
            self.current = self.lists.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.edges.len().saturating_sub(self.seen.len());
        (0, Some(remaining))
    }
}

impl<V, E> FusedIterator for Edges<'_, V, E> {}

/// The edges of one vertex's adjacency list, in insertion order.
///
/// A self-loop appears twice, once for each end.
pub struct AdjacentEdges<'a, E> {
    keys: std::slice::Iter<'a, EdgeKey>,
    edges: &'a SlotMap<EdgeKey, E>,
}

impl<'a, E> AdjacentEdges<'a, E> {
    pub(crate) fn new(list: &'a AdjacencyList, edges: &'a SlotMap<EdgeKey, E>) -> Self {
        AdjacentEdges {
            keys: list.iter(),
            edges,
        }
    }
}

impl<'a, E> Iterator for AdjacentEdges<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let edges = self.edges;
        self.keys.by_ref().find_map(|key| edges.get(*key))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.keys.len()))
    }
}

impl<E> FusedIterator for AdjacentEdges<'_, E> {}
