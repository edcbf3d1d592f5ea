//! Path results shared by the shortest-path engines.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::error::Result;
use super::model::Graph;
use super::node::NodeId;

/// A path through the graph.
///
/// An unreachable target is reported as an empty path with infinite length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphPath {
    /// Sequence of nodes from source to target.
    pub nodes: Vec<NodeId>,
    /// Sum of the edge weights along the path.
    pub total_length: f64,
}

impl GraphPath {
    /// The "no path" result.
    pub fn unreachable() -> Self {
        Self {
            nodes: Vec::new(),
            total_length: f64::INFINITY,
        }
    }

    /// Checks whether the path reaches its target.
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Number of edges on the path.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Gets the source node.
    pub fn source(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Gets the target node.
    pub fn target(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Resolves the path to payloads.
    pub fn payloads<'g, T>(&self, graph: &'g Graph<T>) -> Vec<&'g T> {
        self.nodes.iter().map(|&id| graph.node(id)).collect()
    }
}

/// Walks a predecessor chain back from `target` to `source`.
///
/// Returns None when the chain breaks or loops before reaching `source`.
pub(crate) fn walk_predecessors<F>(
    source: NodeId,
    target: NodeId,
    node_count: usize,
    predecessor: F,
) -> Option<Vec<NodeId>>
where
    F: Fn(NodeId) -> Option<NodeId>,
{
    let mut nodes = vec![target];
    let mut current = target;

    while current != source {
        // A simple path never has more than node_count entries
        if nodes.len() > node_count {
            return None;
        }
        current = predecessor(current)?;
        nodes.push(current);
    }

    nodes.reverse();
    Some(nodes)
}

/// Single-source result of Dijkstra or Bellman-Ford.
///
/// Borrows the graph it was computed on, so the graph cannot change while
/// paths are still being read from it.
#[derive(Debug, Clone)]
pub struct ShortestPaths<'g, T> {
    graph: &'g Graph<T>,
    source: NodeId,
    distances: Vec<f64>,
    predecessors: Vec<Option<NodeId>>,
    /// Finalized nodes, kept only when the search stopped early.
    settled: Option<Vec<bool>>,
}

impl<'g, T> ShortestPaths<'g, T> {
    pub(crate) fn new(
        graph: &'g Graph<T>,
        source: NodeId,
        distances: Vec<f64>,
        predecessors: Vec<Option<NodeId>>,
        settled: Option<Vec<bool>>,
    ) -> Self {
        Self {
            graph,
            source,
            distances,
            predecessors,
            settled,
        }
    }

    /// Source of the computation.
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Whether the search stopped at its expansion bound before finishing.
    pub fn is_truncated(&self) -> bool {
        self.settled.is_some()
    }

    fn is_settled(&self, id: NodeId) -> bool {
        match &self.settled {
            Some(settled) => settled.get(id.0).copied().unwrap_or(false),
            None => true,
        }
    }

    /// Final distance to a node, `+inf` when unreachable or when a truncated
    /// search never finalized it.
    pub fn distance(&self, id: NodeId) -> f64 {
        if !self.is_settled(id) {
            return f64::INFINITY;
        }
        self.distances.get(id.0).copied().unwrap_or(f64::INFINITY)
    }

    /// Predecessor of a node on its best known path.
    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.predecessors.get(id.0).copied().flatten()
    }

    /// Path to a node given by handle.
    pub fn path_to_id(&self, target: NodeId) -> GraphPath {
        let total_length = self.distance(target);
        if total_length == f64::INFINITY {
            return GraphPath::unreachable();
        }

        match walk_predecessors(self.source, target, self.distances.len(), |id| {
            self.predecessor(id)
        }) {
            Some(nodes) => GraphPath {
                nodes,
                total_length,
            },
            None => GraphPath::unreachable(),
        }
    }

    /// Nodes reachable from the source with their distances, in handle order.
    pub fn reachable(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        (0..self.distances.len())
            .map(|i| (NodeId(i), self.distance(NodeId(i))))
            .filter(|(_, d)| d.is_finite())
    }

    /// Gets the k nearest reachable nodes, source included.
    pub fn k_nearest(&self, k: usize) -> Vec<(NodeId, f64)> {
        let mut sorted: Vec<_> = self.reachable().collect();
        sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        sorted.into_iter().take(k).collect()
    }

    /// The graph these paths were computed on.
    pub fn graph(&self) -> &'g Graph<T> {
        self.graph
    }
}

impl<'g, T> ShortestPaths<'g, T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// Path to a payload.
    pub fn path_to(&self, target: &T) -> Result<GraphPath> {
        let id = self.graph.require(target)?;
        Ok(self.path_to_id(id))
    }

    /// Distance to a payload.
    pub fn distance_to(&self, target: &T) -> Result<f64> {
        let id = self.graph.require(target)?;
        Ok(self.distance(id))
    }
}

/// Engines that answer a single `from -> to` query.
///
/// Lets callers swap algorithms behind one interface.
pub trait PathFinder<T> {
    /// Short algorithm name used in logs and reports.
    fn name(&self) -> &'static str;

    fn shortest_path(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath>;
}
