pub mod correspondent_graph;
