use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod vec_graph;

pub type Vertex = u32;
pub type Weight = u32;
pub type Distance = u32;

/// Errors raised while building a graph. Queries never produce these; a
/// graph that constructed successfully is valid for every query.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    // Weights are unsigned, so the whole non-positive class collapses to
    // zero.
    #[error("edge {tail} -> {head} has zero weight, weights must be positive")]
    ZeroWeight { tail: Vertex, head: Vertex },
    #[error("duplicate edge {tail} -> {head}")]
    DuplicateEdge { tail: Vertex, head: Vertex },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEdge {
    tail: Vertex,
    head: Vertex,
    weight: Weight,
}

impl WeightedEdge {
    /// Builds an edge, rejecting zero weights. Self-loops are allowed.
    pub fn new(tail: Vertex, head: Vertex, weight: Weight) -> Result<WeightedEdge, GraphError> {
        if weight == 0 {
            return Err(GraphError::ZeroWeight { tail, head });
        }

        Ok(WeightedEdge { tail, head, weight })
    }

    pub fn tail(&self) -> Vertex {
        self.tail
    }

    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn tailless(&self) -> TaillessWeightedEdge {
        TaillessWeightedEdge {
            head: self.head,
            weight: self.weight,
        }
    }
}

/// Storage form of an edge inside an adjacency row, where the tail is
/// implied by the row index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaillessWeightedEdge {
    head: Vertex,
    weight: Weight,
}

impl TaillessWeightedEdge {
    pub fn head(&self) -> Vertex {
        self.head
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_tail(&self, tail: Vertex) -> WeightedEdge {
        WeightedEdge {
            tail,
            head: self.head,
            weight: self.weight,
        }
    }
}

/// A directed weighted graph, immutable once built. Vertices are dense
/// `0..number_of_vertices()` ids; edges carry positive integer weights.
pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        (0..self.number_of_vertices())
            .map(|vertex| self.out_edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn out_edges(
        &self,
        source: Vertex,
    ) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;
}

#[cfg(test)]
pub(crate) mod test_graphs {
    use super::{vec_graph::VecGraph, Vertex, WeightedEdge};

    pub const A: Vertex = 0;
    pub const B: Vertex = 1;
    pub const C: Vertex = 2;
    pub const D: Vertex = 3;
    pub const E: Vertex = 4;

    /// The reference graph AB5, BC4, CD8, DC8, DE6, AD5, CE2, EB3, AE7 with
    /// vertices A..E mapped to 0..4.
    pub fn reference_graph() -> VecGraph {
        let edges = [
            (A, B, 5),
            (B, C, 4),
            (C, D, 8),
            (D, C, 8),
            (D, E, 6),
            (A, D, 5),
            (C, E, 2),
            (E, B, 3),
            (A, E, 7),
        ]
        .iter()
        .map(|&(tail, head, weight)| WeightedEdge::new(tail, head, weight).unwrap())
        .collect::<Vec<_>>();

        VecGraph::from_edges(&edges).unwrap()
    }

    /// Three disjoint components: 0->1 (1), 2->3 (2), 4->5 (3).
    pub fn disconnected_graph() -> VecGraph {
        let edges = [(0, 1, 1), (2, 3, 2), (4, 5, 3)]
            .iter()
            .map(|&(tail, head, weight)| WeightedEdge::new(tail, head, weight).unwrap())
            .collect::<Vec<_>>();

        VecGraph::from_edges(&edges).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphError, WeightedEdge};

    #[test]
    fn zero_weight_is_rejected() {
        assert_eq!(
            WeightedEdge::new(0, 1, 0),
            Err(GraphError::ZeroWeight { tail: 0, head: 1 })
        );
    }

    #[test]
    fn self_loops_are_allowed() {
        let edge = WeightedEdge::new(3, 3, 2).unwrap();
        assert_eq!(edge.tail(), edge.head());
    }

    #[test]
    fn tailless_round_trip() {
        let edge = WeightedEdge::new(1, 2, 7).unwrap();
        assert_eq!(edge.tailless().set_tail(1), edge);
    }
}
