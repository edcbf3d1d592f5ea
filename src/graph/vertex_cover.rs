//! Greedy 2-approximation of a minimum vertex cover.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::Graph;
use super::node::NodeId;

/// A set of nodes touching every edge of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexCover {
    /// Cover members in the order they were picked.
    pub nodes: Vec<NodeId>,
}

impl VertexCover {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Checks that every edge of `graph` has an endpoint in the cover.
    pub fn covers<T>(&self, graph: &Graph<T>) -> bool {
        let members: HashSet<NodeId> = self.nodes.iter().copied().collect();
        graph
            .edges()
            .all(|(u, v, _)| members.contains(&u) || members.contains(&v))
    }
}

/// Picks both endpoints of every edge not yet covered.
///
/// Edges are de-duplicated first ((u, v) and (v, u) are one edge) and scanned
/// in adjacency order. The result is at most twice the size of an optimal
/// cover.
pub fn approximate_vertex_cover<T>(graph: &Graph<T>) -> VertexCover {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
    let edges: Vec<(NodeId, NodeId)> = graph
        .edges()
        .map(|(u, v, _)| (u.min(v), u.max(v)))
        .filter(|key| seen.insert(*key))
        .collect();

    let mut in_cover = vec![false; graph.node_count()];
    let mut cover = VertexCover::default();

    for (u, v) in edges.iter().copied() {
        if in_cover[u.0] || in_cover[v.0] {
            continue;
        }
        in_cover[u.0] = true;
        cover.nodes.push(u);
        if v != u {
            in_cover[v.0] = true;
            cover.nodes.push(v);
        }
    }

    debug!(
        "Vertex cover picked {} of {} nodes for {} edges",
        cover.len(),
        graph.node_count(),
        edges.len()
    );
    cover
}
