//! Edge types for the undirected graph container.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An edge between two vertices.
///
/// The source/target labeling is kept, but undirected consumers treat the
/// pair as unordered.
pub trait UndirectedEdge<V> {
    /// The vertex the edge was created from.
    fn source(&self) -> &V;

    /// The vertex the edge was created to.
    fn target(&self) -> &V;

    /// Returns true if both endpoints are the same vertex.
    fn is_self_loop(&self) -> bool
    where
        V: PartialEq,
    {
        self.source() == self.target()
    }

    /// Returns true if the edge joins `a` and `b`, in either orientation.
    fn connects(&self, a: &V, b: &V) -> bool
    where
        V: PartialEq,
    {
        (self.source() == a && self.target() == b) || (self.source() == b && self.target() == a)
    }

    /// The endpoint opposite `vertex`, or `None` if `vertex` is not an endpoint.
    fn other(&self, vertex: &V) -> Option<&V>
    where
        V: PartialEq,
    {
        if self.source() == vertex {
            Some(self.target())
        } else if self.target() == vertex {
            Some(self.source())
        } else {
            None
        }
    }
}

impl<V> UndirectedEdge<V> for (V, V) {
    #[inline]
    fn source(&self) -> &V {
        &self.0
    }

    #[inline]
    fn target(&self) -> &V {
        &self.1
    }
}

/// Plain edge: a (source, target) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge<V> {
    source: V,
    target: V,
}

impl<V> Edge<V> {
    /// Creates an edge from `source` to `target`.
    pub fn new(source: V, target: V) -> Self {
        Edge { source, target }
    }

    /// Splits the edge into `(source, target)`.
    pub fn into_parts(self) -> (V, V) {
        (self.source, self.target)
    }
}

impl<V> UndirectedEdge<V> for Edge<V> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}

impl<V: fmt::Display> fmt::Display for Edge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.source, self.target)
    }
}

/// Edge carrying a user tag, typically a weight or a label.
///
/// Equality includes the tag, so two tagged edges over the same endpoints
/// with different tags are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaggedEdge<V, T> {
    source: V,
    target: V,
    tag: T,
}

impl<V, T> TaggedEdge<V, T> {
    /// Creates an edge from `source` to `target` tagged with `tag`.
    pub fn new(source: V, target: V, tag: T) -> Self {
        TaggedEdge {
            source,
            target,
            tag,
        }
    }

    /// The edge's tag.
    pub fn tag(&self) -> &T {
        &self.tag
    }
}

impl<V, T> UndirectedEdge<V> for TaggedEdge<V, T> {
    #[inline]
    fn source(&self) -> &V {
        &self.source
    }

    #[inline]
    fn target(&self) -> &V {
        &self.target
    }
}
