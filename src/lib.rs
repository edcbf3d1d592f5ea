//! Metrograph: weighted graphs, shortest paths, coloring and vertex cover,
//! with a loader for metro network files.

pub mod graph;
pub mod network;

pub use graph::{
    approximate_vertex_cover, AStar, BellmanFord, Dijkstra, FloydWarshall, Graph, GraphConfig,
    GraphError, GraphPath, Link, NodeId, PathConfig, PathFinder, WelshPowell,
};
pub use network::{load_network, NetworkConfig, NetworkLoad, Station};
