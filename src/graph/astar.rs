//! A* search from one source to one target.
//!
//! Unlike Dijkstra the search stops as soon as the target leaves the open
//! set, and it never builds state for the whole graph beyond `g` scores.

use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use super::config::PathConfig;
use super::dijkstra::QueueEntry;
use super::error::Result;
use super::heuristic::Heuristic;
use super::model::Graph;
use super::node::NodeId;
use super::path::{walk_predecessors, GraphPath, PathFinder};

/// A* engine.
///
/// The open set is ordered by `f = g + h`; equal `f` values pop in
/// insertion order of the nodes (lower [`NodeId`] first).
#[derive(Debug, Clone, Default)]
pub struct AStar {
    config: PathConfig,
}

impl AStar {
    /// Creates a new A* engine.
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PathConfig::default())
    }

    /// Finds a path using the payload's own [`Heuristic`].
    pub fn find_path<T>(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath>
    where
        T: Heuristic + Eq + Hash + Clone + Debug,
    {
        self.find_path_with(graph, from, to, |node: &T, target: &T| node.estimate(target))
    }

    /// Finds a path using a caller-supplied heuristic `h(node, target)`.
    pub fn find_path_with<T, H>(
        &self,
        graph: &Graph<T>,
        from: &T,
        to: &T,
        heuristic: H,
    ) -> Result<GraphPath>
    where
        T: Eq + Hash + Clone + Debug,
        H: Fn(&T, &T) -> f64,
    {
        self.config.validate()?;
        let source = graph.require(from)?;
        let target = graph.require(to)?;
        self.search(graph, source, target, heuristic)
    }

    /// Runs the search between two handles.
    pub fn search<T, H>(
        &self,
        graph: &Graph<T>,
        source: NodeId,
        target: NodeId,
        heuristic: H,
    ) -> Result<GraphPath>
    where
        H: Fn(&T, &T) -> f64,
    {
        graph.check_id(source)?;
        graph.check_id(target)?;
        let n = graph.node_count();
        let goal = graph.node(target);

        let mut g_score = vec![f64::INFINITY; n];
        let mut h_cache: Vec<Option<f64>> = vec![None; n];
        let mut parent: Vec<Option<NodeId>> = vec![None; n];
        let mut h = |id: NodeId| -> f64 {
            *h_cache[id.0].get_or_insert_with(|| {
                // A NaN estimate carries no information, order by g alone
                let estimate = heuristic(graph.node(id), goal);
                if estimate.is_nan() {
                    0.0
                } else {
                    estimate
                }
            })
        };

        let mut open = BinaryHeap::new();
        g_score[source.0] = 0.0;
        open.push(QueueEntry {
            node: source,
            priority: h(source),
        });

        let mut expanded = 0usize;
        while let Some(QueueEntry { node, priority }) = open.pop() {
            // Skip entries superseded by a cheaper path
            if priority > g_score[node.0] + h(node) {
                continue;
            }

            if node == target {
                debug!(
                    "A* reached {} from {} after expanding {} nodes",
                    target, source, expanded
                );
                return Ok(
                    match walk_predecessors(source, target, n, |id| parent[id.0]) {
                        Some(nodes) => GraphPath {
                            nodes,
                            total_length: g_score[target.0],
                        },
                        None => GraphPath::unreachable(),
                    },
                );
            }

            if let Some(limit) = self.config.max_expansions {
                if expanded >= limit {
                    warn!("A* gave up after {} expansions", expanded);
                    return Ok(GraphPath::unreachable());
                }
            }
            expanded += 1;

            let g_current = g_score[node.0];
            for &(neighbor, weight) in graph.adjacent(node) {
                let tentative = g_current + weight;
                if tentative < g_score[neighbor.0] {
                    g_score[neighbor.0] = tentative;
                    parent[neighbor.0] = Some(node);
                    open.push(QueueEntry {
                        node: neighbor,
                        priority: tentative + h(neighbor),
                    });
                }
            }
        }

        debug!("A* exhausted the open set, {} unreachable from {}", target, source);
        Ok(GraphPath::unreachable())
    }
}

impl<T> PathFinder<T> for AStar
where
    T: Heuristic + Eq + Hash + Clone + Debug,
{
    fn name(&self) -> &'static str {
        "astar"
    }

    fn shortest_path(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath> {
        self.find_path(graph, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::config::GraphConfig;
    use crate::graph::error::GraphError;
    use crate::graph::node::Link;

    /// Point on a plane, identified by name only.
    #[derive(Debug, Clone, Copy)]
    struct Spot {
        name: &'static str,
        x: f64,
        y: f64,
    }

    impl PartialEq for Spot {
        fn eq(&self, other: &Self) -> bool {
            self.name == other.name
        }
    }

    impl Eq for Spot {}

    impl Hash for Spot {
        fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
            self.name.hash(state);
        }
    }

    impl Heuristic for Spot {
        fn estimate(&self, target: &Self) -> f64 {
            ((self.x - target.x).powi(2) + (self.y - target.y).powi(2)).sqrt()
        }
    }

    const A: Spot = Spot { name: "A", x: 0.0, y: 0.0 };
    const B: Spot = Spot { name: "B", x: 1.0, y: 1.0 };
    const C: Spot = Spot { name: "C", x: 2.0, y: 2.0 };
    const D: Spot = Spot { name: "D", x: 3.0, y: 3.0 };

    fn build_test_graph() -> Graph<Spot> {
        let links = vec![
            Link::undirected(A, B, 10.0),
            Link::undirected(A, C, 2.0),
            Link::undirected(B, D, 3.0),
            Link::undirected(C, D, 5.0),
        ];
        Graph::from_links(links, GraphConfig::default()).unwrap()
    }

    fn names(path: &GraphPath, graph: &Graph<Spot>) -> Vec<&'static str> {
        path.payloads(graph).iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_astar_basic() {
        let graph = build_test_graph();
        let path = AStar::with_defaults().find_path(&graph, &A, &D).unwrap();

        assert_eq!(names(&path, &graph), vec!["A", "C", "D"]);
        assert_eq!(path.total_length, 7.0);
    }

    #[test]
    fn test_astar_zero_heuristic_matches_dijkstra() {
        let graph = build_test_graph();
        let path = AStar::with_defaults()
            .find_path_with(&graph, &B, &C, |_, _| 0.0)
            .unwrap();

        assert_eq!(names(&path, &graph), vec!["B", "D", "C"]);
        assert_eq!(path.total_length, 8.0);
    }

    #[test]
    fn test_astar_unreachable() {
        let mut graph = build_test_graph();
        let e = Spot { name: "E", x: 9.0, y: 9.0 };
        graph.add_node(e);

        let path = AStar::with_defaults().find_path(&graph, &A, &e).unwrap();
        assert!(path.nodes.is_empty());
        assert_eq!(path.total_length, f64::INFINITY);
    }

    #[test]
    fn test_astar_source_is_target() {
        let graph = build_test_graph();
        let path = AStar::with_defaults().find_path(&graph, &C, &C).unwrap();

        assert_eq!(names(&path, &graph), vec!["C"]);
        assert_eq!(path.total_length, 0.0);
    }

    #[test]
    fn test_astar_unknown_vertex() {
        let graph = build_test_graph();
        let ghost = Spot { name: "Z", x: 0.0, y: 0.0 };
        let err = AStar::with_defaults().find_path(&graph, &A, &ghost).unwrap_err();

        assert!(matches!(err, GraphError::UnknownVertex(_)));
    }

    #[test]
    fn test_astar_expansion_limit() {
        let graph = build_test_graph();
        let engine = AStar::new(PathConfig::new().with_max_expansions(1));
        let path = engine.find_path(&graph, &A, &D).unwrap();

        // Only A gets expanded before the limit hits
        assert!(!path.is_reachable());
    }

    #[test]
    fn test_astar_as_path_finder() {
        let graph = build_test_graph();
        let finder: &dyn PathFinder<Spot> = &AStar::with_defaults();

        assert_eq!(finder.name(), "astar");
        let path = finder.shortest_path(&graph, &D, &A).unwrap();
        assert_eq!(path.total_length, 7.0);
    }

    #[test]
    fn test_astar_nan_estimate_keeps_optimal_path() {
        let graph = build_test_graph();
        let path = AStar::with_defaults()
            .find_path_with(&graph, &A, &D, |node, _| {
                if node.name == "C" {
                    f64::NAN
                } else {
                    0.0
                }
            })
            .unwrap();

        assert_eq!(names(&path, &graph), vec!["A", "C", "D"]);
        assert_eq!(path.total_length, 7.0);
    }

    #[test]
    fn test_astar_search_foreign_handle() {
        let graph = build_test_graph();
        let err = AStar::with_defaults()
            .search(&graph, NodeId(0), NodeId(12), |a: &Spot, b: &Spot| a.estimate(b))
            .unwrap_err();

        assert_eq!(err, GraphError::UnknownVertex("#12".to_string()));
    }
}
