//! Construction options for [`UndirectedGraph`](super::UndirectedGraph).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options fixed when a graph is created.
///
/// # Example
///
/// ```rust
/// use graph_heaps::graph::{Edge, GraphConfig, UndirectedGraph};
///
/// let config = GraphConfig::default()
///     .parallel_edges(false)
///     .vertex_capacity(16);
/// let graph: UndirectedGraph<u32, Edge<u32>> = UndirectedGraph::with_config(config);
/// assert!(!graph.allow_parallel_edges());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GraphConfig {
    /// Whether two edges over the same unordered endpoint pair may coexist.
    pub allow_parallel_edges: bool,
    /// Vertices to reserve room for up front.
    pub vertex_capacity: usize,
    /// Edges to reserve room for up front.
    pub edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            allow_parallel_edges: true,
            vertex_capacity: 0,
            edge_capacity: 0,
        }
    }
}

impl GraphConfig {
    /// Sets the parallel-edge policy.
    pub fn parallel_edges(mut self, allow: bool) -> Self {
        self.allow_parallel_edges = allow;
        self
    }

    /// Sets the initial vertex capacity.
    pub fn vertex_capacity(mut self, capacity: usize) -> Self {
        self.vertex_capacity = capacity;
        self
    }

    /// Sets the initial edge capacity.
    pub fn edge_capacity(mut self, capacity: usize) -> Self {
        self.edge_capacity = capacity;
        self
    }
}
