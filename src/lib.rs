//! Shortest-path and path-counting queries over small, static, directed
//! weighted graphs.
//!
//! The crate is built around a min-priority queue with amortized O(1) insert
//! and decrease-key ([`queue::fibonacci_heap::FibonacciHeap`]). On top of it
//! sit two query algorithms: single-target Dijkstra search
//! ([`search::dijkstra`]) and bounded-length path counting
//! ([`search::path_counting`]). Graphs are built once and only read
//! afterwards ([`graphs`]).

pub mod graphs;
pub mod queue;
pub mod search;
