//! Welsh-Powell greedy graph coloring.
//!
//! A heuristic, not an exact chromatic-number solver. Coloring uses the
//! undirected view of the graph: direction and weight are ignored, every link
//! (including `+inf` ones) makes its endpoints adjacent, self-loops are
//! skipped.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{GraphError, Result};
use super::model::Graph;
use super::node::NodeId;
use super::planarity;

/// Lifecycle of a [`WelshPowell`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColoringState {
    Uncolored,
    Colored,
}

/// Welsh-Powell coloring engine.
///
/// Derived queries return `GraphError::NotColored` until
/// [`color_graph`](Self::color_graph) has run.
#[derive(Debug, Clone)]
pub struct WelshPowell<'g, T> {
    graph: &'g Graph<T>,
    neighbors: Vec<Vec<NodeId>>,
    colors: Vec<Option<usize>>,
    state: ColoringState,
}

impl<'g, T> WelshPowell<'g, T> {
    /// Creates an uncolored engine over `graph`.
    pub fn new(graph: &'g Graph<T>) -> Self {
        let neighbors = graph.undirected_neighbors();
        Self {
            graph,
            colors: vec![None; neighbors.len()],
            neighbors,
            state: ColoringState::Uncolored,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ColoringState {
        self.state
    }

    /// Degree of a node in the undirected view.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.neighbors
            .get(id.0)
            .map(Vec::len)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    /// Colors the graph and returns the number of colors used.
    pub fn color_graph(&mut self) -> usize {
        let n = self.neighbors.len();
        self.colors = vec![None; n];

        // Stable sort: equal degrees keep insertion order
        let mut order: Vec<NodeId> = self.graph.node_ids().collect();
        let degrees: Vec<usize> = self.neighbors.iter().map(Vec::len).collect();
        order.sort_by(|a, b| degrees[b.0].cmp(&degrees[a.0]));

        let mut color = 0usize;
        for (i, &vertex) in order.iter().enumerate() {
            if self.colors[vertex.0].is_some() {
                continue;
            }
            self.colors[vertex.0] = Some(color);

            for &candidate in &order[i + 1..] {
                if self.colors[candidate.0].is_none() && !self.conflicts(candidate, color) {
                    self.colors[candidate.0] = Some(color);
                }
            }
            debug!("Color {} assigned starting from {}", color, vertex);
            color += 1;
        }

        self.state = ColoringState::Colored;
        info!("Colored {} nodes with {} colors", n, color);
        color
    }

    /// Clears the assignment without touching the graph.
    pub fn reset(&mut self) {
        self.colors.iter_mut().for_each(|c| *c = None);
        self.state = ColoringState::Uncolored;
    }

    fn conflicts(&self, id: NodeId, color: usize) -> bool {
        self.neighbors[id.0]
            .iter()
            .any(|n| self.colors[n.0] == Some(color))
    }

    fn ensure_colored(&self) -> Result<()> {
        match self.state {
            ColoringState::Colored => Ok(()),
            ColoringState::Uncolored => Err(GraphError::NotColored),
        }
    }

    /// Color id of a node given by handle.
    pub fn color_of_id(&self, id: NodeId) -> Result<usize> {
        self.ensure_colored()?;
        self.colors
            .get(id.0)
            .copied()
            .flatten()
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    /// Color ids indexed by [`NodeId`].
    pub fn colors(&self) -> Result<Vec<usize>> {
        self.ensure_colored()?;
        Ok(self.colors.iter().map(|c| c.unwrap_or_default()).collect())
    }

    /// Number of colors used (`max + 1`, zero for an empty graph).
    pub fn color_count(&self) -> Result<usize> {
        self.ensure_colored()?;
        Ok(self.colors.iter().flatten().max().map_or(0, |m| m + 1))
    }

    /// Sufficient condition only: at most two colors were needed.
    pub fn is_bipartite(&self) -> Result<bool> {
        Ok(self.color_count()? <= 2)
    }

    /// Nodes grouped by color id, each group in insertion order.
    pub fn color_groups(&self) -> Result<Vec<Vec<NodeId>>> {
        let mut groups = vec![Vec::new(); self.color_count()?];
        for (i, color) in self.colors.iter().enumerate() {
            if let Some(c) = color {
                groups[*c].push(NodeId(i));
            }
        }
        Ok(groups)
    }

    /// Heuristic planarity check: edge bound, K5 subgraph, then K3,3 across
    /// the two color classes. Subdivisions go undetected.
    pub fn is_planar(&self) -> Result<bool> {
        let groups = self.color_groups()?;
        let bipartition = match groups.as_slice() {
            [left, right] => Some((left.as_slice(), right.as_slice())),
            _ => None,
        };
        Ok(planarity::is_planar(&self.neighbors, bipartition))
    }
}

impl<'g, T> WelshPowell<'g, T>
where
    T: Eq + Hash + Clone + Debug,
{
    /// Color id of a payload.
    pub fn color_of(&self, payload: &T) -> Result<usize> {
        self.ensure_colored()?;
        let id = self.graph.require(payload)?;
        self.color_of_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::config::GraphConfig;
    use crate::graph::node::Link;

    fn graph_of(edges: &[(u32, u32)]) -> Graph<u32> {
        let links = edges.iter().map(|&(a, b)| Link::undirected(a, b, 1.0));
        Graph::from_links(links, GraphConfig::default()).unwrap()
    }

    fn cycle(n: u32) -> Graph<u32> {
        let edges: Vec<_> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        graph_of(&edges)
    }

    fn complete(n: u32) -> Graph<u32> {
        let mut edges = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                edges.push((a, b));
            }
        }
        graph_of(&edges)
    }

    fn assert_proper(coloring: &WelshPowell<'_, u32>, graph: &Graph<u32>) {
        let colors = coloring.colors().unwrap();
        for (u, v, _) in graph.edges() {
            if u != v {
                assert_ne!(colors[u.index()], colors[v.index()], "{u} and {v} share a color");
            }
        }
    }

    #[test]
    fn test_chain_uses_two_colors() {
        let links = vec![
            Link::undirected("A", "B", 1.0),
            Link::undirected("B", "C", 1.0),
            Link::undirected("C", "D", 1.0),
            Link::undirected("D", "E", 1.0),
        ];
        let graph = Graph::from_links(links, GraphConfig::default()).unwrap();
        let mut coloring = WelshPowell::new(&graph);

        assert_eq!(coloring.color_graph(), 2);
        let a = coloring.color_of(&"A").unwrap();
        assert_eq!(coloring.color_of(&"C").unwrap(), a);
        assert_eq!(coloring.color_of(&"E").unwrap(), a);

        let b = coloring.color_of(&"B").unwrap();
        assert_ne!(a, b);
        assert_eq!(coloring.color_of(&"D").unwrap(), b);
    }

    #[test]
    fn test_complete_graph_needs_n_colors() {
        for n in 2..=6 {
            let graph = complete(n);
            let mut coloring = WelshPowell::new(&graph);
            coloring.color_graph();

            assert_eq!(coloring.color_count().unwrap(), n as usize);
            assert_proper(&coloring, &graph);
        }
    }

    #[test]
    fn test_even_cycle_two_colors() {
        for n in [4, 6, 8] {
            let graph = cycle(n);
            let mut coloring = WelshPowell::new(&graph);
            coloring.color_graph();

            assert_eq!(coloring.color_count().unwrap(), 2);
            assert!(coloring.is_bipartite().unwrap());
            assert_proper(&coloring, &graph);
        }
    }

    #[test]
    fn test_odd_cycle_three_colors() {
        for n in [3, 5, 7] {
            let graph = cycle(n);
            let mut coloring = WelshPowell::new(&graph);
            coloring.color_graph();

            assert_eq!(coloring.color_count().unwrap(), 3);
            assert!(!coloring.is_bipartite().unwrap());
            assert_proper(&coloring, &graph);
        }
    }

    #[test]
    fn test_directed_links_still_conflict() {
        let links = vec![Link::direct(1u32, 2, 1.0), Link::indirect(3, 2, 1.0)];
        let graph = Graph::from_links(links, GraphConfig::default()).unwrap();
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();

        assert_proper(&coloring, &graph);
        assert_eq!(coloring.color_count().unwrap(), 2);
    }

    #[test]
    fn test_queries_require_coloring() {
        let graph = cycle(4);
        let mut coloring = WelshPowell::new(&graph);

        assert_eq!(coloring.state(), ColoringState::Uncolored);
        assert_eq!(coloring.color_count(), Err(GraphError::NotColored));
        assert_eq!(coloring.is_bipartite(), Err(GraphError::NotColored));
        assert_eq!(coloring.color_of(&0), Err(GraphError::NotColored));

        coloring.color_graph();
        assert_eq!(coloring.state(), ColoringState::Colored);
        assert!(coloring.color_count().is_ok());

        coloring.reset();
        assert_eq!(coloring.state(), ColoringState::Uncolored);
        assert_eq!(coloring.color_groups(), Err(GraphError::NotColored));
    }

    #[test]
    fn test_color_groups() {
        let graph = cycle(4);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();
        let groups = coloring.color_groups().unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![NodeId(0), NodeId(2)]);
        assert_eq!(groups[1], vec![NodeId(1), NodeId(3)]);
    }

    #[test]
    fn test_empty_graph() {
        let graph: Graph<u32> = Graph::default();
        let mut coloring = WelshPowell::new(&graph);

        assert_eq!(coloring.color_graph(), 0);
        assert_eq!(coloring.color_count().unwrap(), 0);
        assert!(coloring.is_planar().unwrap());
    }

    #[test]
    fn test_planarity() {
        let graph = complete(4);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();
        assert!(coloring.is_planar().unwrap());

        let graph = complete(5);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();
        assert!(!coloring.is_planar().unwrap());
    }

    #[test]
    fn test_planarity_finds_k33() {
        let mut edges = Vec::new();
        for a in 0..3u32 {
            for b in 10..13u32 {
                edges.push((a, b));
            }
        }
        let graph = graph_of(&edges);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();

        assert!(coloring.is_bipartite().unwrap());
        assert!(!coloring.is_planar().unwrap());
    }

    #[test]
    fn test_planarity_misses_subdivided_k5() {
        // Every K5 edge split by a midpoint node: non-planar, but neither
        // K5 nor K3,3 appears as a plain subgraph.
        let mut edges = Vec::new();
        let mut mid = 100u32;
        for a in 0..5u32 {
            for b in (a + 1)..5u32 {
                edges.push((a, mid));
                edges.push((mid, b));
                mid += 1;
            }
        }
        let graph = graph_of(&edges);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();

        assert!(coloring.is_planar().unwrap());
    }

    #[test]
    fn test_foreign_handle_is_unknown_vertex() {
        let graph = cycle(4);
        let mut coloring = WelshPowell::new(&graph);
        coloring.color_graph();

        assert_eq!(coloring.degree(NodeId(0)).unwrap(), 2);
        assert!(matches!(
            coloring.degree(NodeId(9)),
            Err(GraphError::UnknownVertex(_))
        ));
        assert!(matches!(
            coloring.color_of_id(NodeId(9)),
            Err(GraphError::UnknownVertex(_))
        ));
    }
}
