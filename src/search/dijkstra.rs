use ahash::{HashSet, HashSetExt};
use log::trace;

use crate::{
    graphs::{Distance, Graph, Vertex},
    queue::{FibonacciHeap, HeapError},
};

/// Dijkstra's algorithm, terminating as soon as `target` is settled.
///
/// Instead of seeding the queue with `source` at distance 0, the first
/// relaxation step is unrolled: each out-neighbor of `source` is seeded at
/// its edge weight. A query with `source == target` therefore answers the
/// shortest cycle through the vertex, never 0.
///
/// Returns `None` when `target` is unreachable. Unreachability is an
/// expected outcome, not an error. Edge weights are positive by graph
/// construction, which Dijkstra's correctness relies on.
pub fn shortest_path_distance(
    graph: &dyn Graph,
    source: Vertex,
    target: Vertex,
) -> Option<Distance> {
    let mut queue = FibonacciHeap::new();
    let mut queued = HashSet::new();

    relax_out_edges(graph, &mut queue, &mut queued, source, 0);

    while let Some((distance, vertex)) = queue.extract_min() {
        trace!("settled vertex {} at distance {}", vertex, distance);
        if vertex == target {
            return Some(distance);
        }
        relax_out_edges(graph, &mut queue, &mut queued, vertex, distance);
    }

    None
}

fn relax_out_edges(
    graph: &dyn Graph,
    queue: &mut FibonacciHeap<Distance, Vertex>,
    queued: &mut HashSet<Vertex>,
    vertex: Vertex,
    distance: Distance,
) {
    for edge in graph.out_edges(vertex) {
        let alternative = distance + edge.weight();
        if queued.contains(&edge.head()) {
            match queue.decrease_key(&edge.head(), alternative) {
                Ok(_) => {}
                // The head was already settled and extracted with a final
                // distance. Expected during speculative relaxation.
                Err(HeapError::NotFound) => {}
                Err(HeapError::InvalidKey) => {
                    unreachable!("integer distances are always orderable")
                }
            }
        } else {
            queue
                .insert(alternative, edge.head())
                .expect("integer distances are always orderable");
            queued.insert(edge.head());
        }
    }
}
