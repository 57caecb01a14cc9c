use itertools::Itertools;
use log::trace;

use crate::graphs::{Graph, Vertex};

/// Counts the directed paths from `source` to `target` whose length stays
/// within `max_length`.
///
/// With `use_weights` every edge contributes its weight to a path's length,
/// otherwise every edge counts as one unit. With `exact_length` only paths
/// of length exactly `max_length` are counted, otherwise every path of
/// length up to `max_length`.
///
/// The zero-length path from a vertex to itself is not a route and is never
/// reported, with one exception: asking for paths of exactly length 0 is
/// explicitly asking for it, so `count_paths(v, v, 0, true, _)` is 1.
/// An unreachable or absent `target` yields 0.
///
/// The table is built bottom-up per call, `O(max_length * |V|)` cells, and
/// nothing is memoized across calls.
pub fn count_paths(
    graph: &dyn Graph,
    source: Vertex,
    target: Vertex,
    max_length: u32,
    exact_length: bool,
    use_weights: bool,
) -> u64 {
    let number_of_vertices = graph.number_of_vertices();
    if source >= number_of_vertices || target >= number_of_vertices {
        return 0;
    }

    // path_counts[len][v] is the number of paths from v to target of length
    // exactly len (when counting exactly) or at most len (otherwise, where
    // the +1 row seed carries shorter paths forward through every level).
    let mut path_counts: Vec<Vec<u64>> = Vec::with_capacity(max_length as usize + 1);
    for this_len in 0..=max_length {
        let row = (0..number_of_vertices)
            .map(|vertex| {
                let mut count = 0;
                for edge in graph.out_edges(vertex) {
                    let edge_len = if use_weights { edge.weight() } else { 1 };
                    if edge_len <= this_len {
                        count += path_counts[(this_len - edge_len) as usize]
                            [edge.head() as usize];
                    }
                }
                if vertex == target && (!exact_length || this_len == 0) {
                    count += 1;
                }
                count
            })
            .collect_vec();
        path_counts.push(row);
    }
    trace!(
        "path count table built, {} levels x {} vertices",
        max_length + 1,
        number_of_vertices
    );

    let mut count = path_counts[max_length as usize][source as usize];
    // Subtract the zero-length path seeded at the target; under exact
    // semantics it only reaches the answer when max_length is 0, where it is
    // the requested path.
    if source == target && !exact_length {
        count -= 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::count_paths;
    use crate::graphs::test_graphs::{self, A, C};

    #[test]
    fn unweighted_at_most_counts() {
        let graph = test_graphs::reference_graph();

        // C -> D -> C and C -> E -> B -> C.
        assert_eq!(count_paths(&graph, C, C, 3, false, false), 2);
    }

    #[test]
    fn unweighted_exact_counts() {
        let graph = test_graphs::reference_graph();

        // A-B-C-D-C, A-D-C-D-C and A-D-E-B-C.
        assert_eq!(count_paths(&graph, A, C, 4, true, false), 3);
        // C-D-C-D-C and C-D-E-B-C.
        assert_eq!(count_paths(&graph, C, C, 4, true, false), 2);
    }

    #[test]
    fn weighted_at_most_counts() {
        let graph = test_graphs::reference_graph();

        assert_eq!(count_paths(&graph, C, C, 29, false, true), 7);
        // Raising the bound to 30 admits the two concatenations of the
        // cycles C-E-B-C (9) and C-D-E-B-C (21).
        assert_eq!(count_paths(&graph, C, C, 30, false, true), 9);
    }

    #[test]
    fn at_most_counts_grow_with_the_bound() {
        let graph = test_graphs::reference_graph();

        // ABC, ADC, then AEBC, then ABCDC, ADCDC and ADEBC.
        assert_eq!(count_paths(&graph, A, C, 2, false, false), 2);
        assert_eq!(count_paths(&graph, A, C, 3, false, false), 3);
        assert_eq!(count_paths(&graph, A, C, 4, false, false), 6);
    }

    #[test]
    fn zero_length_bound() {
        let graph = test_graphs::reference_graph();

        // Exactly zero length is explicitly the zero-length path.
        assert_eq!(count_paths(&graph, C, C, 0, true, false), 1);
        assert_eq!(count_paths(&graph, C, C, 0, true, true), 1);
        // The zero-length path is not a route under at-most semantics.
        assert_eq!(count_paths(&graph, C, C, 0, false, false), 0);
        assert_eq!(count_paths(&graph, C, C, 0, false, true), 0);
        // Distinct endpoints have no zero-length path at all.
        assert_eq!(count_paths(&graph, A, C, 0, true, false), 0);
        assert_eq!(count_paths(&graph, A, C, 0, false, false), 0);
    }

    #[test]
    fn cross_component_counts_are_zero() {
        let graph = test_graphs::disconnected_graph();

        assert_eq!(count_paths(&graph, 0, 4, 10, false, false), 0);
        assert_eq!(count_paths(&graph, 0, 2, 10, false, true), 0);
        assert_eq!(count_paths(&graph, 4, 4, 0, false, false), 0);
        assert_eq!(count_paths(&graph, 0, 1, 10, false, false), 1);
    }

    #[test]
    fn absent_vertices_count_zero() {
        let graph = test_graphs::reference_graph();

        assert_eq!(count_paths(&graph, 100, C, 5, false, false), 0);
        assert_eq!(count_paths(&graph, A, 100, 5, false, false), 0);
    }

    #[test]
    fn repeated_queries_are_idempotent() {
        let graph = test_graphs::reference_graph();

        let first = count_paths(&graph, C, C, 29, false, true);
        let second = count_paths(&graph, C, C, 29, false, true);
        assert_eq!(first, second);
        assert_eq!(first, 7);
    }
}
