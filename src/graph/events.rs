//! Edge change notification
//!
//! Subscribers are plain callbacks registered on the graph. They run
//! synchronously, after the mutation is committed and before the mutating
//! call returns, in registration order.
//!
//! There is no re-entrancy guard. A callback only sees the edge, never the
//! graph, so a subscriber that wants to react by mutating the graph has to do
//! it through shared state of its own, and may then observe the graph between
//! two steps of a batch operation.

use std::fmt;

/// Boxed edge callback.
pub type EdgeCallback<E> = Box<dyn FnMut(&E)>;

/// Identifies one registered callback, for [`unsubscribe`](super::UndirectedGraph::unsubscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Which event a callback listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeEvent {
    Added,
    Removed,
}

/// Registry of edge-added and edge-removed subscribers.
pub(crate) struct EdgeEvents<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, EdgeEvent, EdgeCallback<E>)>,
}

impl<E> Default for EdgeEvents<E> {
    fn default() -> Self {
        EdgeEvents {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<E> EdgeEvents<E> {
    pub(crate) fn subscribe(&mut self, event: EdgeEvent, callback: EdgeCallback<E>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, event, callback));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub(crate) fn notify(&mut self, event: EdgeEvent, edge: &E) {
        for (_, listens_to, callback) in self.subscribers.iter_mut() {
            if *listens_to == event {
                callback(edge);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.subscribers.len()
    }
}

impl<E> fmt::Debug for EdgeEvents<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeEvents")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
