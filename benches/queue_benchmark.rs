//! Queue and Shortest-Path Benchmarks
//!
//! - **heap_ops**: raw FibonacciHeap insert / decrease-key / extract-min
//! - **queue_relaxation**: FibonacciQueue driven the way Dijkstra drives it
//! - **dijkstra**: full searches over grid and sparse random graphs
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench queue_benchmark
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graph_heaps::graph::{TaggedEdge, UndirectedGraph};
use graph_heaps::pathfinding::dijkstra;
use graph_heaps::{FibonacciHeap, FibonacciQueue};
use rustc_hash::FxHashMap;

// ============================================================================
// Simple PRNG for reproducible benchmarks
// ============================================================================

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        (self.next() % u64::from(bound.max(1))) as u32
    }
}

// ============================================================================
// Graph builders
// ============================================================================

type Weighted = UndirectedGraph<u32, TaggedEdge<u32, u64>>;

fn grid(side: u32, seed: u64) -> Weighted {
    let mut rng = Lcg::new(seed);
    let mut graph = Weighted::new();
    graph.add_vertex_range(0..side * side);
    for r in 0..side {
        for c in 0..side {
            let v = r * side + c;
            if c + 1 < side {
                graph.add_vertices_and_edge(TaggedEdge::new(v, v + 1, 1 + u64::from(rng.next_below(100))));
            }
            if r + 1 < side {
                graph.add_vertices_and_edge(TaggedEdge::new(v, v + side, 1 + u64::from(rng.next_below(100))));
            }
        }
    }
    graph
}

fn sparse_random(vertices: u32, avg_degree: u32, seed: u64) -> Weighted {
    let mut rng = Lcg::new(seed);
    let mut graph = Weighted::new();
    graph.add_vertex_range(0..vertices);
    // A spanning path keeps the graph connected.
    for v in 1..vertices {
        graph.add_vertices_and_edge(TaggedEdge::new(v - 1, v, 1 + u64::from(rng.next_below(1000))));
    }
    for _ in 0..vertices * avg_degree / 2 {
        let s = rng.next_below(vertices);
        let t = rng.next_below(vertices);
        graph.add_vertices_and_edge(TaggedEdge::new(s, t, 1 + u64::from(rng.next_below(1000))));
    }
    graph
}

// ============================================================================
// Benchmarks
// ============================================================================

fn benchmark_heap_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap_ops");

    for &n in &[1_000usize, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("insert_extract", n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = Lcg::new(42);
                let mut heap = FibonacciHeap::new();
                for i in 0..n {
                    heap.insert(rng.next(), i);
                }
                while let Some(item) = heap.pop() {
                    black_box(item);
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("insert_decrease_extract", n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = Lcg::new(7);
                let mut heap = FibonacciHeap::new();
                let handles: Vec<_> = (0..n).map(|i| heap.insert(u64::MAX / 2, i)).collect();
                heap.pop();
                for handle in handles.iter().skip(1) {
                    let _ = heap.decrease_key(*handle, rng.next() % (u64::MAX / 2));
                }
                while let Some(item) = heap.pop() {
                    black_box(item);
                }
            })
        });
    }

    group.finish();
}

fn benchmark_queue_relaxation(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_relaxation");

    for &n in &[1_000u32, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("enqueue_update_dequeue", n), &n, |b, &n| {
            b.iter(|| {
                let mut rng = Lcg::new(1234);
                let distances: FxHashMap<u32, u64> = (0..n).map(|v| (v, 1_000_000)).collect();
                let mut queue = FibonacciQueue::from_map(distances);
                for v in 0..n {
                    let _ = queue.enqueue(v);
                }
                for _ in 0..n {
                    let v = rng.next_below(n);
                    let shorter = rng.next() % 1_000_000;
                    if queue.contains(&v) && shorter < queue.distances()[&v] {
                        queue.distances_mut().insert(v, shorter);
                        let _ = queue.update(&v);
                    }
                }
                while let Ok(v) = queue.dequeue() {
                    black_box(v);
                }
            })
        });
    }

    group.finish();
}

fn benchmark_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(20);

    for &side in &[32u32, 100, 200] {
        let graph = grid(side, 99);
        group.bench_with_input(BenchmarkId::new("grid", side * side), &graph, |b, g| {
            b.iter(|| black_box(dijkstra(g, &0, |e| *e.tag())))
        });
    }

    for &n in &[1_000u32, 10_000, 50_000] {
        let graph = sparse_random(n, 6, 2024);
        group.bench_with_input(BenchmarkId::new("sparse_random", n), &graph, |b, g| {
            b.iter(|| black_box(dijkstra(g, &0, |e| *e.tag())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_heap_ops,
    benchmark_queue_relaxation,
    benchmark_dijkstra,
);

criterion_main!(benches);
