//! Dijkstra's single-source shortest paths.
//!
//! Binary-heap priority queue with lazy deletion: a node may sit in the heap
//! several times, stale entries are dropped when popped after the node has
//! been finalized.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, warn};

use super::config::PathConfig;
use super::error::Result;
use super::model::Graph;
use super::node::NodeId;
use super::path::{GraphPath, PathFinder, ShortestPaths};

/// Entry in the priority queue.
#[derive(Clone, Copy)]
pub(crate) struct QueueEntry {
    pub(crate) node: NodeId,
    pub(crate) priority: f64,
}

impl Eq for QueueEntry {}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.node == other.node
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap, ties go to the earlier-inserted node
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra engine.
///
/// All edge weights must be non-negative. With a negative weight the result
/// is undefined; the engine logs a warning and carries on.
#[derive(Debug, Clone, Default)]
pub struct Dijkstra {
    config: PathConfig,
}

impl Dijkstra {
    /// Creates a new Dijkstra engine.
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PathConfig::default())
    }

    /// Computes shortest paths from `source` to every node.
    pub fn compute<'g, T>(&self, graph: &'g Graph<T>, source: &T) -> Result<ShortestPaths<'g, T>>
    where
        T: Eq + Hash + Clone + Debug,
    {
        self.config.validate()?;
        let source = graph.require(source)?;
        self.compute_from(graph, source)
    }

    /// Computes shortest paths from a node given by handle.
    ///
    /// When the expansion bound cuts the search short, only finalized nodes
    /// keep a distance; the rest read as unreachable.
    pub fn compute_from<'g, T>(
        &self,
        graph: &'g Graph<T>,
        source: NodeId,
    ) -> Result<ShortestPaths<'g, T>> {
        graph.check_id(source)?;
        let start = Instant::now();
        let n = graph.node_count();

        if self.config.warn_on_negative && graph.edges().any(|(_, _, w)| w < 0.0) {
            warn!("Dijkstra run on a graph with negative weights, distances are unreliable");
        }

        let mut distances = vec![f64::INFINITY; n];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut visited_count = 0usize;
        let mut truncated = false;
        let mut heap = BinaryHeap::new();

        distances[source.0] = 0.0;
        heap.push(QueueEntry {
            node: source,
            priority: 0.0,
        });

        while let Some(QueueEntry { node, priority }) = heap.pop() {
            // Skip stale entries for finalized nodes
            if visited[node.0] {
                continue;
            }

            if let Some(limit) = self.config.max_expansions {
                if visited_count >= limit {
                    truncated = true;
                    break;
                }
            }

            visited[node.0] = true;
            visited_count += 1;

            for &(neighbor, weight) in graph.adjacent(node) {
                let candidate = priority + weight;
                if candidate < distances[neighbor.0] {
                    distances[neighbor.0] = candidate;
                    predecessors[neighbor.0] = Some(node);
                    heap.push(QueueEntry {
                        node: neighbor,
                        priority: candidate,
                    });
                }
            }
        }

        debug!(
            "Dijkstra from {} finalized {} of {} nodes in {:?}",
            source,
            visited_count,
            n,
            start.elapsed()
        );

        let settled = truncated.then_some(visited);
        Ok(ShortestPaths::new(
            graph,
            source,
            distances,
            predecessors,
            settled,
        ))
    }
}

impl<T> PathFinder<T> for Dijkstra
where
    T: Eq + Hash + Clone + Debug,
{
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn shortest_path(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath> {
        let target = graph.require(to)?;
        let paths = self.compute(graph, from)?;
        Ok(paths.path_to_id(target))
    }
}
