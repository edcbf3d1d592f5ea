//! Floyd-Warshall all-pairs shortest paths.
//!
//! O(V^3) time and O(V^2) memory. Worth it for small, dense graphs queried
//! for many arbitrary pairs.

use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

use tracing::{debug, warn};

use super::error::{GraphError, Result};
use super::model::Graph;
use super::node::NodeId;
use super::path::{walk_predecessors, GraphPath, PathFinder};

/// Floyd-Warshall engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloydWarshall;

impl FloydWarshall {
    pub fn new() -> Self {
        Self
    }

    /// Computes distances and predecessors for every ordered pair.
    ///
    /// Parallel links keep their lightest weight. Fails with
    /// `GraphError::NegativeCycle` when any node ends up with a negative
    /// distance to itself.
    pub fn compute<'g, T>(&self, graph: &'g Graph<T>) -> Result<AllPairsPaths<'g, T>> {
        let start = Instant::now();
        let n = graph.node_count();

        let mut distances = vec![f64::INFINITY; n * n];
        let mut predecessors: Vec<Option<NodeId>> = vec![None; n * n];

        for i in 0..n {
            distances[i * n + i] = 0.0;
        }
        for (from, to, weight) in graph.edges() {
            let cell = from.0 * n + to.0;
            if weight < distances[cell] {
                distances[cell] = weight;
                predecessors[cell] = Some(from);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = distances[i * n + k];
                if d_ik == f64::INFINITY {
                    continue;
                }
                for j in 0..n {
                    let candidate = d_ik + distances[k * n + j];
                    if candidate < distances[i * n + j] {
                        distances[i * n + j] = candidate;
                        predecessors[i * n + j] = predecessors[k * n + j];
                    }
                }
            }
        }

        if let Some(i) = (0..n).find(|&i| distances[i * n + i] < 0.0) {
            warn!("Negative cycle through {} found by Floyd-Warshall", NodeId(i));
            return Err(GraphError::NegativeCycle);
        }

        debug!(
            "Floyd-Warshall over {} nodes done in {:?}",
            n,
            start.elapsed()
        );

        Ok(AllPairsPaths {
            graph,
            size: n,
            distances,
            predecessors,
        })
    }
}

/// All-pairs result of Floyd-Warshall.
#[derive(Debug, Clone)]
pub struct AllPairsPaths<'g, T> {
    graph: &'g Graph<T>,
    size: usize,
    distances: Vec<f64>,
    predecessors: Vec<Option<NodeId>>,
}

impl<'g, T> AllPairsPaths<'g, T> {
    fn cell(&self, from: NodeId, to: NodeId) -> Result<usize> {
        for id in [from, to] {
            if id.0 >= self.size {
                return Err(GraphError::UnknownVertex(id.to_string()));
            }
        }
        Ok(from.0 * self.size + to.0)
    }

    /// Distance between two nodes given by handle, `+inf` when unreachable.
    pub fn distance_between(&self, from: NodeId, to: NodeId) -> Result<f64> {
        Ok(self.distances[self.cell(from, to)?])
    }

    /// Node from which the best `from -> to` path arrives at `to`.
    pub fn predecessor(&self, from: NodeId, to: NodeId) -> Option<NodeId> {
        self.cell(from, to).ok().and_then(|cell| self.predecessors[cell])
    }

    /// Path between two nodes given by handle.
    pub fn path_between(&self, from: NodeId, to: NodeId) -> Result<GraphPath> {
        let total_length = self.distance_between(from, to)?;
        if total_length == f64::INFINITY {
            return Ok(GraphPath::unreachable());
        }

        Ok(
            match walk_predecessors(from, to, self.size, |id| self.predecessor(from, id)) {
                Some(nodes) => GraphPath {
                    nodes,
                    total_length,
                },
                None => GraphPath::unreachable(),
            },
        )
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl<'g, T> AllPairsPaths<'g, T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// Path between two payloads.
    pub fn path(&self, from: &T, to: &T) -> Result<GraphPath> {
        let from = self.graph.require(from)?;
        let to = self.graph.require(to)?;
        self.path_between(from, to)
    }

    /// Distance between two payloads.
    pub fn distance(&self, from: &T, to: &T) -> Result<f64> {
        let from = self.graph.require(from)?;
        let to = self.graph.require(to)?;
        self.distance_between(from, to)
    }
}

impl<T> PathFinder<T> for FloydWarshall
where
    T: Eq + Hash + Clone + Debug,
{
    fn name(&self) -> &'static str {
        "floyd-warshall"
    }

    fn shortest_path(&self, graph: &Graph<T>, from: &T, to: &T) -> Result<GraphPath> {
        self.compute(graph)?.path(from, to)
    }
}
