//! Bellman-Ford single-source shortest paths.
//!
//! Tolerates negative edge weights and fails on negative cycles reachable
//! from the source.

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, warn};

use super::config::PathConfig;
use super::error::{GraphError, Result};
use super::model::Graph;
use super::node::NodeId;
use super::path::{GraphPath, PathFinder, ShortestPaths};

/// Bellman-Ford engine.
#[derive(Debug, Clone, Default)]
pub struct BellmanFord {
    config: PathConfig,
}

impl BellmanFord {
    /// Creates a new Bellman-Ford engine.
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PathConfig::default())
    }

    /// Computes shortest paths from `source` to every node.
    ///
    /// Returns `GraphError::NegativeCycle` when a negative cycle is reachable
    /// from `source`; no distances are defined in that case.
    pub fn compute<'g, T>(&self, graph: &'g Graph<T>, source: &T) -> Result<ShortestPaths<'g, T>>
    where
        T: Eq + Hash + Clone + Debug,
    {
        self.config.validate()?;
        let source = graph.require(source)?;
        self.compute_from(graph, source)
    }

    /// Computes shortest paths from a node given by handle.
    pub fn compute_from<'g, T>(
        &self,
        graph: &'g Graph<T>,
        source: NodeId,
    ) -> Result<ShortestPaths<'g, T>> {
        graph.check_id(source)?;
        let n = graph.node_count();
        let edges: Vec<(NodeId, NodeId, f64)> = graph.edges().collect();

        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; n];
        distances[source.0] = 0.0;

        let mut rounds = 0usize;
        for _ in 0..n.saturating_sub(1) {
            rounds += 1;
            let mut updated = false;

            for &(u, v, weight) in &edges {
                // Never relax out of an unreachable node
                if distances[u.0] == f64::INFINITY {
                    continue;
                }
                let candidate = distances[u.0] + weight;
                if candidate < distances[v.0] {
                    distances[v.0] = candidate;
                    predecessors[v.0] = Some(u);
                    updated = true;
                }
            }

            if !updated && self.config.early_exit {
                break;
            }
        }

        // One extra round: anything that still relaxes sits on or behind a negative cycle
        for &(u, v, weight) in &edges {
            if distances[u.0] == f64::INFINITY {
                continue;
            }
            if distances[u.0] + weight < distances[v.0] {
                warn!(
                    "Negative cycle reachable from {} detected on edge {} -> {}",
                    source, u, v
                );
                return Err(GraphError::NegativeCycle);
            }
        }

        debug!(
            "Bellman-Ford from {} converged after {} rounds over {} edges",
            source,
            rounds,
            edges.len()
        );

        Ok(ShortestPaths::new(
            graph,
            source,
            distances,
            predecessors,
            None,
        ))
    }
}

impl<T> PathFinder<T> for BellmanFord
where
    T: Eq + Hash + Clone + Debug,
{
    fn name(&self) -> &'static str {
        "bellman-ford"
    }

    fn shortest_path(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath> {
        let target = graph.require(to)?;
        let paths = self.compute(graph, from)?;
        Ok(paths.path_to_id(target))
    }
}
