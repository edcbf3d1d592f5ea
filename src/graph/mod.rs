//! Weighted graph and the algorithms that run on it.
//!
//! This module provides:
//! - **Graph**: interned payloads, adjacency list and optional dense matrix
//! - **Shortest paths**: Dijkstra, Bellman-Ford, Floyd-Warshall and A*
//! - **Coloring**: Welsh-Powell, with bipartite and planarity checks
//! - **Vertex cover**: greedy 2-approximation
//!
//! # Example
//!
//! ```
//! use metrograph::graph::{Dijkstra, Graph, GraphConfig, Link};
//!
//! let links = vec![
//!     Link::undirected("A", "B", 10.0),
//!     Link::undirected("A", "C", 2.0),
//!     Link::undirected("B", "D", 3.0),
//!     Link::undirected("C", "D", 5.0),
//! ];
//! let graph = Graph::from_links(links, GraphConfig::default()).unwrap();
//!
//! let paths = Dijkstra::with_defaults().compute(&graph, &"A").unwrap();
//! let path = paths.path_to(&"D").unwrap();
//! assert_eq!(path.total_length, 7.0);
//! assert_eq!(path.payloads(&graph), vec![&"A", &"C", &"D"]);
//! ```

pub mod astar;
pub mod bellman_ford;
pub mod coloring;
pub mod config;
pub mod dijkstra;
pub mod error;
pub mod floyd_warshall;
pub mod heuristic;
pub mod model;
pub mod node;
pub mod path;
mod planarity;
pub mod vertex_cover;

// Re-exports
pub use astar::AStar;
pub use bellman_ford::BellmanFord;
pub use coloring::{ColoringState, WelshPowell};
pub use config::{ConfigError, GraphConfig, PathConfig};
pub use dijkstra::Dijkstra;
pub use error::{GraphError, Result};
pub use floyd_warshall::{AllPairsPaths, FloydWarshall};
pub use heuristic::{haversine_km, GeoPoint, Heuristic, EARTH_RADIUS_KM};
pub use model::{AdjacencyMatrix, Graph};
pub use node::{Direction, Link, NodeId};
pub use path::{GraphPath, PathFinder, ShortestPaths};
pub use vertex_cover::{approximate_vertex_cover, VertexCover};
