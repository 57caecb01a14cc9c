pub mod dijkstra;
pub mod path_counting;
