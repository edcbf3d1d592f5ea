//! Vertex handles and typed links.

use serde::{Deserialize, Serialize};

/// Handle to a vertex interned in a [`Graph`](super::Graph).
///
/// Handles are dense indices assigned in first-seen order, so comparing two
/// handles also compares insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the dense index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which adjacency entries a [`Link`] inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Both a → b and b → a.
    Undirected,
    /// Only a → b.
    Direct,
    /// Only b → a.
    Indirect,
}

/// Weighted edge between two payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link<T> {
    pub a: T,
    pub b: T,
    pub direction: Direction,
    /// Expected non-negative. Zero and `+inf` ("no practical edge") are allowed,
    /// negative weights only make sense for Bellman-Ford and Floyd-Warshall.
    pub weight: f64,
}

impl<T> Link<T> {
    /// Creates a link with an explicit direction.
    pub fn new(a: T, b: T, direction: Direction, weight: f64) -> Self {
        Self {
            a,
            b,
            direction,
            weight,
        }
    }

    /// Creates an undirected link.
    pub fn undirected(a: T, b: T, weight: f64) -> Self {
        Self::new(a, b, Direction::Undirected, weight)
    }

    /// Creates a link usable only from `a` to `b`.
    pub fn direct(a: T, b: T, weight: f64) -> Self {
        Self::new(a, b, Direction::Direct, weight)
    }

    /// Creates a link usable only from `b` to `a`.
    pub fn indirect(a: T, b: T, weight: f64) -> Self {
        Self::new(a, b, Direction::Indirect, weight)
    }

    /// Returns the (from, to) pairs this link inserts into the adjacency list.
    pub fn arcs(&self) -> Vec<(&T, &T)> {
        match self.direction {
            Direction::Undirected => vec![(&self.a, &self.b), (&self.b, &self.a)],
            Direction::Direct => vec![(&self.a, &self.b)],
            Direction::Indirect => vec![(&self.b, &self.a)],
        }
    }
}
