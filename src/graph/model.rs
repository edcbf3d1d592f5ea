//! Weighted graph over interned payloads.
//!
//! The graph owns one canonical copy of every vertex payload and hands out
//! [`NodeId`] handles. All other structures (adjacency, engine results,
//! colorings) refer to vertices by handle only.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use tracing::{debug, info};

use super::config::GraphConfig;
use super::error::{GraphError, Result};
use super::node::{Direction, Link, NodeId};

/// Dense `V x V` mirror of the adjacency list.
///
/// Entries are indexed by [`NodeId`]. A missing edge reads as `0.0`, not as
/// an absent value, so a zero-weight edge and no edge look the same here.
/// Storage grows geometrically, so interning nodes one at a time stays
/// amortized O(V^2) overall.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMatrix {
    size: usize,
    capacity: usize,
    cells: Vec<f64>,
}

impl AdjacencyMatrix {
    fn with_size(size: usize) -> Self {
        Self {
            size,
            capacity: size,
            cells: vec![0.0; size * size],
        }
    }

    fn grow(&mut self, size: usize) {
        if size <= self.capacity {
            self.size = self.size.max(size);
            return;
        }
        let capacity = size.max(self.capacity * 2);
        let mut cells = vec![0.0; capacity * capacity];
        for i in 0..self.size {
            let old_row = &self.cells[i * self.capacity..i * self.capacity + self.size];
            cells[i * capacity..i * capacity + self.size].copy_from_slice(old_row);
        }
        self.cells = cells;
        self.capacity = capacity;
        self.size = size;
    }

    fn set(&mut self, from: NodeId, to: NodeId, weight: f64) {
        self.cells[from.0 * self.capacity + to.0] = weight;
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Weight of the `from -> to` entry, `0.0` when there is no edge.
    ///
    /// None when either handle lies outside the matrix.
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<f64> {
        if to.0 >= self.size {
            return None;
        }
        self.row(from).map(|row| row[to.0])
    }

    /// Full row for `from`.
    pub fn row(&self, from: NodeId) -> Option<&[f64]> {
        if from.0 >= self.size {
            return None;
        }
        let start = from.0 * self.capacity;
        Some(&self.cells[start..start + self.size])
    }
}

impl PartialEq for AdjacencyMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && (0..self.size).all(|i| self.row(NodeId(i)) == other.row(NodeId(i)))
    }
}

/// Weighted graph built from [`Link`]s.
#[derive(Debug, Clone)]
pub struct Graph<T> {
    nodes: Vec<T>,
    index: HashMap<T, NodeId>,
    adjacency: Vec<Vec<(NodeId, f64)>>,
    matrix: Option<AdjacencyMatrix>,
    config: GraphConfig,
}

impl<T> Graph<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty graph.
    pub fn new(config: GraphConfig) -> Self {
        let matrix = config.build_matrix.then(AdjacencyMatrix::default);
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            adjacency: Vec::new(),
            matrix,
            config,
        }
    }

    /// Builds adjacency list and matrix from a link collection in one pass.
    ///
    /// Fails on the first link with a `NaN` weight.
    pub fn from_links<I>(links: I, config: GraphConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Link<T>>,
    {
        let mut graph = Self::new(config);
        let mut count = 0usize;
        for link in links {
            graph.add_link(link)?;
            count += 1;
        }

        info!(
            "Built graph with {} nodes from {} links",
            graph.node_count(),
            count
        );
        Ok(graph)
    }

    /// Interns an isolated vertex, returning its handle.
    pub fn add_node(&mut self, payload: T) -> NodeId {
        if let Some(&id) = self.index.get(&payload) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(payload.clone());
        self.index.insert(payload, id);
        self.adjacency.push(Vec::new());
        if let Some(matrix) = self.matrix.as_mut() {
            matrix.grow(self.nodes.len());
        }
        id
    }

    /// Inserts a link into the adjacency list (and matrix) per its direction.
    pub fn add_link(&mut self, link: Link<T>) -> Result<()> {
        if link.weight.is_nan() {
            return Err(GraphError::InvalidWeight {
                weight: link.weight,
            });
        }

        let a = self.add_node(link.a.clone());
        let b = self.add_node(link.b.clone());
        let arcs = match link.direction {
            Direction::Undirected => vec![(a, b), (b, a)],
            Direction::Direct => vec![(a, b)],
            Direction::Indirect => vec![(b, a)],
        };

        for (from, to) in arcs {
            self.adjacency[from.0].push((to, link.weight));
            if let Some(matrix) = self.matrix.as_mut() {
                matrix.set(from, to, link.weight);
            }
        }
        Ok(())
    }

    /// Recomputes the dense matrix from the adjacency list.
    pub fn rebuild_matrix(&mut self) {
        let mut matrix = AdjacencyMatrix::with_size(self.nodes.len());
        for (from, edges) in self.adjacency.iter().enumerate() {
            for &(to, weight) in edges {
                matrix.set(NodeId(from), to, weight);
            }
        }
        debug!("Rebuilt {}x{} adjacency matrix", matrix.size, matrix.size);
        self.matrix = Some(matrix);
    }

    /// Looks up the handle of a payload.
    pub fn node_id(&self, payload: &T) -> Option<NodeId> {
        self.index.get(payload).copied()
    }

    /// Checks whether a payload has been interned.
    pub fn contains(&self, payload: &T) -> bool {
        self.index.contains_key(payload)
    }
}

impl<T> Graph<T>
where
    T: Eq + Hash + Clone + fmt::Debug,
{
    /// Looks up the handle of a payload, failing with `UnknownVertex`.
    pub fn require(&self, payload: &T) -> Result<NodeId> {
        self.node_id(payload)
            .ok_or_else(|| GraphError::UnknownVertex(format!("{:?}", payload)))
    }
}

impl<T> Graph<T> {
    /// Returns the payload of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn node(&self, id: NodeId) -> &T {
        &self.nodes[id.0]
    }

    /// Returns the payload of a node, or None for a foreign handle.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0)
    }

    /// All payloads in insertion order.
    pub fn nodes(&self) -> &[T] {
        &self.nodes
    }

    /// All handles in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Number of vertices.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of directed adjacency entries (an undirected link counts twice).
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Number of distinct unordered neighbor pairs, ignoring self-loops.
    pub fn edge_count(&self) -> usize {
        self.undirected_neighbors()
            .iter()
            .map(Vec::len)
            .sum::<usize>()
            / 2
    }

    /// Checks whether a handle belongs to this graph's range.
    pub fn contains_id(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Passes a handle through, failing with `UnknownVertex` when it lies
    /// outside this graph.
    pub fn check_id(&self, id: NodeId) -> Result<NodeId> {
        if self.contains_id(id) {
            Ok(id)
        } else {
            Err(GraphError::UnknownVertex(id.to_string()))
        }
    }

    /// Outgoing `(neighbor, weight)` entries in insertion order.
    pub fn neighbors(&self, id: NodeId) -> Result<&[(NodeId, f64)]> {
        self.adjacency
            .get(id.0)
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    /// Unchecked neighbor lookup for engines that only hold handles from
    /// this graph.
    pub(crate) fn adjacent(&self, id: NodeId) -> &[(NodeId, f64)] {
        &self.adjacency[id.0]
    }

    /// Number of outgoing entries.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        Ok(self.neighbors(id)?.len())
    }

    /// Checks for a `from -> to` entry.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> Result<bool> {
        self.check_id(to)?;
        Ok(self.neighbors(from)?.iter().any(|&(n, _)| n == to))
    }

    /// Iterates all `(from, to, weight)` entries in adjacency order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, edges)| edges.iter().map(move |&(to, w)| (NodeId(from), to, w)))
    }

    /// Symmetric, de-duplicated neighbor lists without self-loops.
    ///
    /// Neighbors appear in first-seen order while scanning the adjacency list.
    pub fn undirected_neighbors(&self) -> Vec<Vec<NodeId>> {
        let n = self.nodes.len();
        let mut lists: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        for (from, to, _) in self.edges() {
            if from == to {
                continue;
            }
            let key = (from.0.min(to.0), from.0.max(to.0));
            if seen.insert(key) {
                lists[from.0].push(to);
                lists[to.0].push(from);
            }
        }
        lists
    }

    /// Dense matrix, when enabled.
    pub fn adjacency_matrix(&self) -> Option<&AdjacencyMatrix> {
        self.matrix.as_ref()
    }

    /// Construction settings.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

impl<T: fmt::Debug> Graph<T> {
    /// Renders the dense matrix, one row per line.
    pub fn display_adjacency_matrix(&self) -> String {
        let Some(matrix) = self.matrix.as_ref() else {
            return String::from("(adjacency matrix disabled)");
        };

        let mut out = String::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let row: Vec<String> = matrix
                .row(NodeId(i))
                .into_iter()
                .flatten()
                .map(|w| format!("{:>6}", w))
                .collect();
            out.push_str(&format!("{:?}: {}\n", node, row.join(" ")));
        }
        out
    }
}

impl<T> Default for Graph<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

impl<T: fmt::Debug> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            write!(f, "{:?} ->", node)?;
            for &(to, weight) in &self.adjacency[i] {
                write!(f, " {:?} ({})", self.nodes[to.0], weight)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
