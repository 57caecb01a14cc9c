use std::slice::Iter;

use serde::{Deserialize, Serialize};

use super::{Graph, GraphError, TaillessWeightedEdge, Vertex, WeightedEdge};

/// Adjacency-list graph. Row `v` holds the out-edges of vertex `v`, sorted
/// by head so duplicate parallel edges are caught with a binary search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VecGraph {
    edges: Vec<Vec<TaillessWeightedEdge>>,
}

impl VecGraph {
    /// Builds a graph from an edge list. Fails on a repeated ordered
    /// (tail, head) pair; zero weights were already rejected when the
    /// `WeightedEdge` was constructed.
    pub fn from_edges(edges: &[WeightedEdge]) -> Result<VecGraph, GraphError> {
        let mut graph = VecGraph { edges: Vec::new() };
        for edge in edges {
            graph.insert_edge(edge)?;
        }
        Ok(graph)
    }

    fn insert_edge(&mut self, edge: &WeightedEdge) -> Result<(), GraphError> {
        // Sink vertices get an empty row so they still count as vertices.
        let max_vertex = edge.tail().max(edge.head());
        if (self.edges.len() as u32) <= max_vertex {
            self.edges.resize((max_vertex + 1) as usize, Vec::new());
        }

        let row = &mut self.edges[edge.tail() as usize];
        match row.binary_search_by_key(&edge.head(), |out_edge| out_edge.head()) {
            Ok(_) => Err(GraphError::DuplicateEdge {
                tail: edge.tail(),
                head: edge.head(),
            }),
            Err(index) => {
                row.insert(index, edge.tailless());
                Ok(())
            }
        }
    }
}

impl Graph for VecGraph {
    fn number_of_vertices(&self) -> u32 {
        self.edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    fn out_edges(
        &self,
        source: Vertex,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        struct OutEdgeIterator<'a> {
            source: Vertex,
            tailless_edges: Iter<'a, TaillessWeightedEdge>,
        }

        impl<'a> Iterator for OutEdgeIterator<'a> {
            type Item = WeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                Some(self.tailless_edges.next()?.set_tail(self.source))
            }
        }

        impl<'a> ExactSizeIterator for OutEdgeIterator<'a> {
            fn len(&self) -> usize {
                self.tailless_edges.len()
            }
        }

        let tailless_edges = match self.edges.get(source as usize) {
            Some(row) => row.iter(),
            None => [].iter(),
        };

        Box::new(OutEdgeIterator {
            source,
            tailless_edges,
        })
    }
}
