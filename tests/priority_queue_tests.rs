//! Integration tests for FibonacciQueue
//!
//! Helpers are written against the `PriorityQueue` trait; the distance maps
//! behind them are shared through `Rc<RefCell<_>>` so a test can change a
//! distance and then call `update`.

use graph_heaps::{Binding, FibonacciQueue, PriorityQueue, QueueError};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Shared = Rc<RefCell<HashMap<char, u32>>>;

fn shared(pairs: &[(char, u32)]) -> Shared {
    Rc::new(RefCell::new(pairs.iter().copied().collect()))
}

/// Queue reading through a closure over the shared map.
fn closure_queue(
    distances: &Shared,
) -> FibonacciQueue<char, u32, impl Fn(&char) -> Option<u32>> {
    let source = Rc::clone(distances);
    FibonacciQueue::new(move |v: &char| source.borrow().get(v).copied())
}

fn drain<Q: PriorityQueue<char>>(queue: &mut Q) -> Vec<char> {
    let mut out = Vec::new();
    while let Ok(v) = queue.dequeue() {
        out.push(v);
    }
    assert!(queue.is_empty());
    out
}

fn test_orders_by_distance<Q: PriorityQueue<char>>(mut queue: Q) {
    for v in ['a', 'b', 'c'] {
        queue.enqueue(v).unwrap();
    }
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.peek(), Ok(&'b'));
    assert_eq!(drain(&mut queue), vec!['b', 'a', 'c']);
    assert_eq!(queue.dequeue(), Err(QueueError::Empty));
    assert_eq!(queue.peek(), Err(QueueError::Empty));
}

fn test_membership<Q: PriorityQueue<char>>(mut queue: Q) {
    assert!(!queue.contains(&'a'));
    queue.enqueue('a').unwrap();
    assert!(queue.contains(&'a'));
    assert_eq!(queue.enqueue('a'), Err(QueueError::AlreadyEnqueued));
    assert_eq!(queue.len(), 1);

    assert_eq!(queue.dequeue(), Ok('a'));
    assert!(!queue.contains(&'a'));
    assert_eq!(queue.update(&'a'), Err(QueueError::NotEnqueued));

    // A dequeued vertex may come back.
    queue.enqueue('a').unwrap();
    assert_eq!(queue.to_vec(), vec!['a']);
}

#[test]
fn test_map_backed_queue() {
    let map: HashMap<char, u32> = [('a', 5), ('b', 2), ('c', 8)].into_iter().collect();
    test_orders_by_distance(FibonacciQueue::from_map(map.clone()));
    test_membership(FibonacciQueue::from_map(map));
}

#[test]
fn test_closure_backed_queue() {
    let distances = shared(&[('a', 5), ('b', 2), ('c', 8)]);
    test_orders_by_distance(closure_queue(&distances));
    test_membership(closure_queue(&distances));
}

#[test]
fn test_update_moves_vertex_to_front() {
    let distances = shared(&[('a', 5), ('b', 2), ('c', 8)]);
    let mut queue = closure_queue(&distances);
    for v in ['a', 'b', 'c'] {
        queue.enqueue(v).unwrap();
    }

    distances.borrow_mut().insert('c', 1);
    queue.update(&'c').unwrap();
    assert_eq!(queue.priority(&'c'), Some(&1));

    assert_eq!(drain(&mut queue), vec!['c', 'b', 'a']);
}

#[test]
fn test_update_rejects_increased_distance() {
    let mut queue = FibonacciQueue::from_map(HashMap::from([('a', 5u32), ('b', 2)]));
    queue.enqueue('a').unwrap();
    queue.enqueue('b').unwrap();

    queue.distances_mut().insert('b', 9);
    assert_eq!(queue.update(&'b'), Err(QueueError::PriorityIncreased));
    assert_eq!(queue.priority(&'b'), Some(&2));
    assert_eq!(queue.peek(), Ok(&'b'));
}

#[test]
fn test_unknown_vertex() {
    let mut queue = FibonacciQueue::from_map(HashMap::from([('a', 1u32)]));
    assert_eq!(queue.enqueue('z'), Err(QueueError::UnknownVertex));
    assert!(queue.is_empty());
    assert_eq!(queue.update(&'z'), Err(QueueError::NotEnqueued));
}

#[test]
fn test_equal_distances_all_dequeued() {
    let mut queue = FibonacciQueue::from_map(HashMap::from([('x', 3u32), ('y', 3), ('z', 3)]));
    for v in ['x', 'y', 'z'] {
        queue.enqueue(v).unwrap();
    }
    let mut drained = drain(&mut queue);
    drained.sort();
    assert_eq!(drained, vec!['x', 'y', 'z']);
}

#[test]
fn test_predeclared_vertices() {
    let mut queue = FibonacciQueue::with_vertices(['a', 'b'], HashMap::from([('a', 4u32), ('b', 1)]));
    assert_eq!(queue.binding(&'a'), Some(&Binding::Absent));
    assert_eq!(queue.binding(&'q'), None);
    assert!(queue.is_empty());

    queue.enqueue('a').unwrap();
    assert!(matches!(queue.binding(&'a'), Some(Binding::Bound(_))));

    queue.clear();
    assert!(queue.is_empty());
    assert_eq!(queue.binding(&'a'), Some(&Binding::Absent));
}

#[test]
fn test_custom_comparator_orders_largest_first() {
    let map = HashMap::from([('a', 5u32), ('b', 2), ('c', 8)]);
    let mut queue = FibonacciQueue::from_map_with_comparator(map, |x: &u32, y: &u32| y.cmp(x));
    for v in ['a', 'b', 'c'] {
        queue.enqueue(v).unwrap();
    }
    assert_eq!(drain(&mut queue), vec!['c', 'a', 'b']);
}

#[test]
fn test_many_updates_keep_order() {
    let n = 200u32;
    let mut queue = FibonacciQueue::from_map((0..n).map(|v| (v, 1000 + v)).collect::<HashMap<_, _>>());
    for v in 0..n {
        queue.enqueue(v).unwrap();
    }
    // Force consolidation before the updates.
    assert_eq!(queue.dequeue(), Ok(0));

    for v in (1..n).filter(|v| v % 7 == 0) {
        queue.distances_mut().insert(v, v);
        queue.update(&v).unwrap();
    }

    let mut last = 0;
    while let Ok(v) = queue.dequeue() {
        let d = queue.distances()[&v];
        assert!(d >= last);
        last = d;
    }
}

#[test]
fn test_into_distances_returns_source() {
    let mut queue = FibonacciQueue::from_map(HashMap::from([('a', 1u32)]));
    queue.distances_mut().insert('b', 2);
    let map = queue.into_distances();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_update_to_lower_priority_dequeues_first() {
    let mut queue = FibonacciQueue::from_map(HashMap::from([('a', 10u32), ('d', 4), ('e', 7)]));
    for v in ['a', 'd', 'e'] {
        queue.enqueue(v).unwrap();
    }
    queue.distances_mut().insert('a', 3);
    queue.update(&'a').unwrap();

    assert_eq!(queue.dequeue(), Ok('a'));
    assert_eq!(queue.dequeue(), Ok('d'));
}
